use crate::error::PricingError;
use bid_types::{Attribute, ResourceUnit};
use std::collections::HashMap;
use tracing::debug;

/// Price used for unmatched GPUs when no mapping is configured.
pub const FALLBACK_GPU_PRICE: f64 = 100.0;

/// Model, VRAM and interface tokens pulled out of a GPU's attribute keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpuIdentity {
    pub model: String,
    pub vram: String,
    pub interface: String,
}

impl GpuIdentity {
    /// Scans attribute keys such as `vendor/nvidia/model/a100/ram/80Gi`
    /// for the token following `model`, `ram` and `interface`.
    pub fn from_attributes(attributes: &[Attribute]) -> Self {
        let mut identity = GpuIdentity::default();

        for attr in attributes {
            let parts: Vec<&str> = attr.key.split('/').collect();
            for (i, part) in parts.iter().enumerate() {
                let Some(next) = parts.get(i + 1) else { continue };
                match *part {
                    "model" => identity.model = next.to_string(),
                    "ram" => identity.vram = next.to_string(),
                    "interface" => identity.interface = next.to_string(),
                    _ => {}
                }
            }
        }

        identity
    }

    /// Lookup keys, most specific first: `model.vram.interface`, then
    /// `model.vram`, then `model`. Empty components are left out and a
    /// GPU without a model yields no keys at all.
    pub fn lookup_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if self.model.is_empty() {
            return keys;
        }

        let mut full = self.model.clone();
        if !self.vram.is_empty() {
            full.push('.');
            full.push_str(&self.vram);
        }
        if !self.interface.is_empty() {
            full.push('.');
            full.push_str(&self.interface);
        }
        keys.push(full);

        if !self.interface.is_empty() && !self.vram.is_empty() {
            keys.push(format!("{}.{}", self.model, self.vram));
        }
        if !self.interface.is_empty() || !self.vram.is_empty() {
            keys.push(self.model.clone());
        }

        keys
    }
}

/// USD-per-GPU-month prices keyed by GPU key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpuPriceTable {
    prices: HashMap<String, f64>,
}

impl GpuPriceTable {
    /// Parses `key=price` pairs separated by commas. Empty input and empty
    /// pairs are allowed; anything else that is not `string=number` fails.
    pub fn parse(mappings: &str) -> Result<Self, PricingError> {
        let mut prices = HashMap::new();

        for pair in mappings.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let kv: Vec<&str> = pair.split('=').collect();
            if kv.len() != 2 || kv[0].is_empty() {
                return Err(PricingError::InvalidGpuMapping(pair.to_string()));
            }

            let price = kv[1].trim().parse::<f64>().map_err(|e| PricingError::InvalidGpuPrice {
                key: kv[0].to_string(),
                reason: e.to_string(),
            })?;
            prices.insert(kv[0].trim().to_string(), price);
        }

        Ok(Self { prices })
    }

    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self {
            prices: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.prices.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Highest configured price, or [`FALLBACK_GPU_PRICE`] for an empty table.
    pub fn max_price(&self) -> f64 {
        self.prices
            .values()
            .copied()
            .fold(None, |max: Option<f64>, p| Some(max.map_or(p, |m| m.max(p))))
            .unwrap_or(FALLBACK_GPU_PRICE)
    }

    /// Per-GPU monthly price for `gpu`, falling back to `default` when no
    /// key matches.
    pub fn resolve(&self, gpu: &GpuIdentity, default: f64) -> f64 {
        for key in gpu.lookup_keys() {
            if let Some(price) = self.get(&key) {
                debug!(%key, price, "matched GPU price");
                return price;
            }
        }
        debug!(?gpu, default, "no GPU price matched, using default");
        default
    }
}

/// Monthly USD cost of every GPU in the group. Each unit contributes
/// GPU units × repetition count × resolved price.
pub fn total_gpu_cost(units: &[ResourceUnit], table: &GpuPriceTable) -> f64 {
    let default = table.max_price();

    units
        .iter()
        .filter_map(|unit| unit.gpu.as_ref().map(|gpu| (unit, gpu)))
        .map(|(unit, gpu)| {
            let identity = GpuIdentity::from_attributes(&gpu.attributes);
            let price = table.resolve(&identity, default);
            let cost = unit.repetitions() as f64 * f64::from(gpu.units) * price;
            debug!(
                model = %identity.model,
                vram = %identity.vram,
                interface = %identity.interface,
                units = gpu.units,
                price,
                cost,
                "GPU pricing"
            );
            cost
        })
        .sum()
}
