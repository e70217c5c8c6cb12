use crate::error::PricingError;
use bid_types::NATIVE_DENOM;
use serde::Serialize;

pub const AVERAGE_BLOCK_TIME_SECONDS: f64 = 6.117;
pub const DAYS_PER_MONTH: f64 = 30.437;
pub const BLOCKS_PER_MONTH: f64 = (60.0 / AVERAGE_BLOCK_TIME_SECONDS) * 24.0 * 60.0 * DAYS_PER_MONTH;

/// Micro-units per whole token.
pub const MICRO_UNITS: f64 = 1_000_000.0;

const CANONICAL_PRECISION: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockRate {
    /// Per-block price in native micro-units.
    pub per_block_native: f64,
    /// Per-block price in USD.
    pub per_block_usd: f64,
    /// `per_block_native` at 16 fractional digits with the denom appended.
    pub canonical: String,
}

/// Converts a monthly USD cost into per-block rates using `usd_per_unit`
/// USD per whole native token.
pub fn to_block_rate(monthly_usd: f64, usd_per_unit: f64) -> Result<BlockRate, PricingError> {
    if !usd_per_unit.is_finite() || usd_per_unit <= 0.0 {
        return Err(PricingError::InvalidRate(usd_per_unit));
    }

    let monthly_micro = monthly_usd / usd_per_unit * MICRO_UNITS;
    let per_block_native = monthly_micro / BLOCKS_PER_MONTH;
    let per_block_usd = monthly_usd / BLOCKS_PER_MONTH;

    Ok(BlockRate {
        per_block_native,
        per_block_usd,
        canonical: format!("{:.*}{}", CANONICAL_PRECISION, per_block_native, NATIVE_DENOM),
    })
}
