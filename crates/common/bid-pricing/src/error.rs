use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("price information is missing or incomplete")]
    PriceMissing,

    #[error("denom is not supported: {0}")]
    UnsupportedDenom(String),

    #[error("invalid price amount: {0}")]
    InvalidCeiling(String),

    #[error("invalid GPU mapping: {0}")]
    InvalidGpuMapping(String),

    #[error("invalid GPU price for {key}: {reason}")]
    InvalidGpuPrice { key: String, reason: String },

    #[error("exchange rate must be a positive number, got {0}")]
    InvalidRate(f64),
}
