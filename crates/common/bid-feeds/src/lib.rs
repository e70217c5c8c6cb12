#![forbid(unsafe_code)]

pub mod error;
pub mod feed;
pub mod metrics;
pub mod source;
pub mod store;
pub mod whitelist;

pub use error::FeedError;
pub use feed::{CachedRate, CachingPriceFeed, RATE_MAX_AGE_MINUTES};
pub use source::{extract_usd_price, HttpPriceSource, PriceSource};
pub use store::{FileSnapshotStore, MemorySnapshotStore, Snapshot, SnapshotStore};
pub use whitelist::{Whitelist, WHITELIST_MAX_AGE_MINUTES};
