use crate::config::BidConfig;
use anyhow::{anyhow, Context, Result};
use bid_feeds::{FileSnapshotStore, Whitelist};
use tracing::{debug, info};

/// Rate quoted to special accounts regardless of the request.
pub const SPECIAL_ACCOUNT_RATE: &str = "1.00";

/// Outcome of checking whether a request's owner may be bid for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Owner is a special account; quote [`SPECIAL_ACCOUNT_RATE`] and skip pricing.
    Special,
    /// Owner passed every configured check; price normally.
    Allowed,
}

/// Decides whether the configured owner may be bid for. Requires an
/// owner, short-circuits special accounts and enforces the whitelist when
/// a whitelist URL is configured.
pub async fn admit(config: &BidConfig) -> Result<Admission> {
    let owner = config
        .owner
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .ok_or_else(|| anyhow!("request owner is not specified"))?;

    if config.special_accounts.iter().any(|a| a == owner) {
        info!(owner, "special account, using fixed rate");
        return Ok(Admission::Special);
    }

    let url = match config.whitelist_url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => url,
        None => {
            debug!("no whitelist configured");
            return Ok(Admission::Allowed);
        }
    };

    let store = FileSnapshotStore::new(&config.cache.whitelist_path);
    let whitelist = Whitelist::new(url, Box::new(store), config.http_timeout())
        .context("whitelist check failed")?;
    whitelist.check(owner).await.context("whitelist check failed")?;

    Ok(Admission::Allowed)
}
