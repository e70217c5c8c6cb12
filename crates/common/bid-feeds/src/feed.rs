use crate::error::FeedError;
use crate::metrics;
use crate::source::PriceSource;
use crate::store::SnapshotStore;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info, warn};

/// How long a fetched exchange rate stays usable.
pub const RATE_MAX_AGE_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedRate {
    pub usd_per_unit: f64,
    pub fetched_at: DateTime<Utc>,
}

/// USD exchange rate of the native token, served from a snapshot store
/// while fresh and refetched from the primary (then fallback) source once
/// it has expired.
pub struct CachingPriceFeed {
    primary: Box<dyn PriceSource>,
    fallback: Box<dyn PriceSource>,
    store: Box<dyn SnapshotStore>,
    max_age: Duration,
}

impl CachingPriceFeed {
    pub fn new(
        primary: Box<dyn PriceSource>,
        fallback: Box<dyn PriceSource>,
        store: Box<dyn SnapshotStore>,
    ) -> Self {
        Self {
            primary,
            fallback,
            store,
            max_age: Duration::minutes(RATE_MAX_AGE_MINUTES),
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// The stored rate, if there is one and it is still fresh. Unreadable
    /// or unparseable snapshots count as absent.
    pub fn cached(&self) -> Option<CachedRate> {
        let snapshot = match self.store.load() {
            Ok(Some(s)) => s,
            Ok(None) => return None,
            Err(e) => {
                debug!("rate cache unreadable: {}", e);
                return None;
            }
        };

        if Utc::now() - snapshot.written_at >= self.max_age {
            debug!(written_at = %snapshot.written_at, "cached rate expired");
            return None;
        }

        match snapshot.body.trim().parse::<f64>() {
            Ok(rate) if rate.is_finite() && rate > 0.0 => Some(CachedRate {
                usd_per_unit: rate,
                fetched_at: snapshot.written_at,
            }),
            _ => {
                debug!(body = %snapshot.body, "cached rate is not a usable number");
                None
            }
        }
    }

    /// Fetches a new rate, trying the fallback source once if the primary
    /// fails, and stores it.
    pub async fn refresh(&self) -> Result<CachedRate, FeedError> {
        let usd_per_unit = match self.primary.fetch_usd_price().await {
            Ok(rate) => rate,
            Err(primary_err) => {
                metrics::record_source_failure(self.primary.name());
                warn!(source = %self.primary.name(), "primary price source failed, trying fallback: {}", primary_err);

                match self.fallback.fetch_usd_price().await {
                    Ok(rate) => rate,
                    Err(fallback_err) => {
                        metrics::record_source_failure(self.fallback.name());
                        error!(source = %self.fallback.name(), "fallback price source failed: {}", fallback_err);
                        return Err(FeedError::PriceUnavailable {
                            primary: primary_err.to_string(),
                            fallback: fallback_err.to_string(),
                        });
                    }
                }
            }
        };

        if let Err(e) = self.store.save(&usd_per_unit.to_string()) {
            warn!("could not persist fetched rate: {}", e);
        }
        info!(usd_per_unit, "refreshed exchange rate");

        Ok(CachedRate {
            usd_per_unit,
            fetched_at: Utc::now(),
        })
    }

    /// USD per native token, from cache when fresh.
    pub async fn get_rate(&self) -> Result<f64, FeedError> {
        if let Some(cached) = self.cached() {
            metrics::record_rate_cache_hit();
            debug!(usd_per_unit = cached.usd_per_unit, "using cached exchange rate");
            return Ok(cached.usd_per_unit);
        }

        metrics::record_rate_cache_miss();
        Ok(self.refresh().await?.usd_per_unit)
    }
}
