use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

lazy_static! {
    pub static ref RATE_CACHE_HITS_TOTAL: IntCounter = register_int_counter!(
        "rate_cache_hits_total",
        "Exchange-rate lookups served from the cache"
    )
    .expect("rate_cache_hits_total metric registers once");

    pub static ref RATE_CACHE_MISSES_TOTAL: IntCounter = register_int_counter!(
        "rate_cache_misses_total",
        "Exchange-rate lookups that had to go to a price source"
    )
    .expect("rate_cache_misses_total metric registers once");

    pub static ref PRICE_SOURCE_FAILURES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "price_source_failures_total",
        "Failed fetches per price source",
        &["source"]
    )
    .expect("price_source_failures_total metric registers once");

    pub static ref WHITELIST_REFRESHES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "whitelist_refreshes_total",
        "Whitelist downloads by result",
        &["status"]
    )
    .expect("whitelist_refreshes_total metric registers once");
}

pub fn record_rate_cache_hit() {
    RATE_CACHE_HITS_TOTAL.inc();
}

pub fn record_rate_cache_miss() {
    RATE_CACHE_MISSES_TOTAL.inc();
}

pub fn record_source_failure(source: &str) {
    PRICE_SOURCE_FAILURES_TOTAL.with_label_values(&[source]).inc();
}

pub fn record_whitelist_refresh(status: &str) {
    WHITELIST_REFRESHES_TOTAL.with_label_values(&[status]).inc();
}
