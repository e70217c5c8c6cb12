use anyhow::{Context, Result};
use bid_feeds::source::{DEFAULT_ASSET_ID, DEFAULT_FALLBACK_PRICE_URL, DEFAULT_PRICE_API_TIMEOUT_SECS, DEFAULT_PRIMARY_PRICE_URL};
use bid_pricing::{GpuPriceTable, PriceTargets, PricingError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Accounts that always get the special rate.
pub const DEFAULT_SPECIAL_ACCOUNTS: [&str; 2] = [
    "akash1fxa9ss3dg6nqyz8aluyaa6svypgprk5tw9fa4q",
    "akash1fhe3uk7d95vvr69pna7cxmwa8777as46uyxcz8",
];

/// Configuration for one bidctl invocation. Read from an optional TOML
/// file, then overridden by environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BidConfig {
    /// Account the bid is for.
    pub owner: Option<String>,

    /// Log pricing details to stderr.
    pub verbose: bool,

    /// Optional log filter (e.g. "info", "bid_pricing=debug").
    pub log_level: Option<String>,

    /// Where to download the whitelist from. No URL disables the check.
    pub whitelist_url: Option<String>,

    pub special_accounts: Vec<String>,

    pub cache: CacheConfig,

    pub price_feed: PriceFeedConfig,

    pub targets: TargetsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub rate_path: PathBuf,
    pub whitelist_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PriceFeedConfig {
    pub primary_url: String,
    pub fallback_url: String,
    pub asset_id: String,
    pub timeout_secs: u64,
}

/// Unset targets fall back to the engine defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TargetsConfig {
    pub cpu: Option<f64>,
    pub memory: Option<f64>,
    pub hd_ephemeral: Option<f64>,
    pub hd_pers_hdd: Option<f64>,
    pub hd_pers_ssd: Option<f64>,
    pub hd_pers_nvme: Option<f64>,
    pub endpoint: Option<f64>,
    pub ip: Option<f64>,
    /// Comma-separated `key=price` pairs.
    pub gpu_mappings: Option<String>,
}

impl Default for BidConfig {
    fn default() -> Self {
        Self {
            owner: None,
            verbose: false,
            log_level: None,
            whitelist_url: None,
            special_accounts: DEFAULT_SPECIAL_ACCOUNTS.iter().map(|a| a.to_string()).collect(),
            cache: CacheConfig::default(),
            price_feed: PriceFeedConfig::default(),
            targets: TargetsConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            rate_path: PathBuf::from("/tmp/aktprice.cache"),
            whitelist_path: PathBuf::from("/tmp/price-script.whitelist"),
        }
    }
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            primary_url: DEFAULT_PRIMARY_PRICE_URL.to_string(),
            fallback_url: DEFAULT_FALLBACK_PRICE_URL.to_string(),
            asset_id: DEFAULT_ASSET_ID.to_string(),
            timeout_secs: DEFAULT_PRICE_API_TIMEOUT_SECS,
        }
    }
}

impl BidConfig {
    /// Loads the TOML file at `path` (if any) and applies the process
    /// environment on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let text = fs::read_to_string(p).with_context(|| format!("Failed to read configuration file: {:?}", p))?;
                toml::from_str(&text).with_context(|| format!("Failed to parse configuration file: {:?}", p))?
            }
            None => BidConfig::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overrides fields from environment-style variables. Numeric values
    /// that do not parse are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let float = |key: &str| lookup(key).and_then(|v| v.trim().parse::<f64>().ok());

        let t = &mut self.targets;
        for (key, slot) in [
            ("PRICE_TARGET_CPU", &mut t.cpu),
            ("PRICE_TARGET_MEMORY", &mut t.memory),
            ("PRICE_TARGET_HD_EPHEMERAL", &mut t.hd_ephemeral),
            ("PRICE_TARGET_HD_PERS_HDD", &mut t.hd_pers_hdd),
            ("PRICE_TARGET_HD_PERS_SSD", &mut t.hd_pers_ssd),
            ("PRICE_TARGET_HD_PERS_NVME", &mut t.hd_pers_nvme),
            ("PRICE_TARGET_ENDPOINT", &mut t.endpoint),
            ("PRICE_TARGET_IP", &mut t.ip),
        ] {
            if let Some(v) = float(key) {
                *slot = Some(v);
            }
        }
        if let Some(v) = lookup("PRICE_TARGET_GPU_MAPPINGS") {
            t.gpu_mappings = Some(v);
        }

        if let Some(url) = lookup("WHITELIST_URL") {
            self.whitelist_url = Some(url.trim().trim_matches('"').to_string());
        }
        if let Some(owner) = lookup("AKASH_OWNER") {
            self.owner = Some(owner);
        }
        if let Some(flag) = lookup("DEBUG_BID_SCRIPT") {
            self.verbose = matches!(flag.trim(), "1" | "true" | "yes");
        }
    }

    /// Resolved price targets. A malformed GPU mapping is an error.
    pub fn price_targets(&self) -> Result<PriceTargets, PricingError> {
        let t = &self.targets;
        let defaults = PriceTargets::default();
        let gpu_prices = match t.gpu_mappings.as_deref() {
            Some(mappings) => GpuPriceTable::parse(mappings)?,
            None => GpuPriceTable::default(),
        };

        Ok(PriceTargets {
            cpu: t.cpu.unwrap_or(defaults.cpu),
            memory: t.memory.unwrap_or(defaults.memory),
            hd_ephemeral: t.hd_ephemeral.unwrap_or(defaults.hd_ephemeral),
            hd_pers_hdd: t.hd_pers_hdd.unwrap_or(defaults.hd_pers_hdd),
            hd_pers_ssd: t.hd_pers_ssd.unwrap_or(defaults.hd_pers_ssd),
            hd_pers_nvme: t.hd_pers_nvme.unwrap_or(defaults.hd_pers_nvme),
            endpoint: t.endpoint.unwrap_or(defaults.endpoint),
            ip: t.ip.unwrap_or(defaults.ip),
            gpu_prices,
        })
    }

    pub fn http_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.price_feed.timeout_secs)
    }
}
