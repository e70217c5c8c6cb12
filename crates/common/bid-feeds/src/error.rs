use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP request error: status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("response has no usable price field ({0})")]
    MissingField(String),

    #[error("price must be a positive number, got {0}")]
    NonPositive(f64),

    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error getting price: primary source failed: {primary}; fallback source failed: {fallback}")]
    PriceUnavailable { primary: String, fallback: String },

    #[error("error fetching whitelist: {0}")]
    WhitelistFetch(String),

    #[error("{0} is not whitelisted")]
    NotWhitelisted(String),
}
