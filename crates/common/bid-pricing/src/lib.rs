#![forbid(unsafe_code)]

pub mod aggregate;
pub mod cost;
pub mod decision;
pub mod error;
pub mod gpu;
pub mod metrics;
pub mod rate;
pub mod targets;

pub use aggregate::normalize;
pub use cost::monthly_cost;
pub use decision::{decide, BidDecision, PriceQuote};
pub use error::PricingError;
pub use gpu::{total_gpu_cost, GpuIdentity, GpuPriceTable, FALLBACK_GPU_PRICE};
pub use rate::{to_block_rate, BlockRate, BLOCKS_PER_MONTH};
pub use targets::PriceTargets;

use bid_types::{BidRequest, NormalizedResources};
use serde::Serialize;
use tracing::debug;

/// Everything computed while pricing one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub resources: NormalizedResources,
    pub gpu_cost_usd: f64,
    pub monthly_usd: f64,
    pub block_rate: BlockRate,
    pub decision: BidDecision,
}

/// Prices a request against the configured targets at the given
/// USD-per-token exchange rate.
///
/// Fails when the request carries no usable ceiling, when its denomination
/// is not accepted, or when the rate cannot be used for conversion. A
/// ceiling below the required rate is not an error; it comes back as
/// [`BidDecision::TooLow`].
pub fn price_request(
    request: &BidRequest,
    targets: &PriceTargets,
    usd_per_unit: f64,
) -> Result<Quote, PricingError> {
    let quote = PriceQuote::from_request(request)?;

    let resources = normalize(&request.resources);
    let gpu_cost_usd = total_gpu_cost(&request.resources, &targets.gpu_prices);
    let monthly_usd = monthly_cost(&resources, targets, gpu_cost_usd);
    debug!(?resources, gpu_cost_usd, monthly_usd, "computed monthly cost");

    let block_rate = to_block_rate(monthly_usd, usd_per_unit)?;
    debug!(canonical = %block_rate.canonical, usd = block_rate.per_block_usd, "computed block rate");

    let decision = decide(&block_rate, &quote)?;
    metrics::record_decision(&decision);

    Ok(Quote {
        resources,
        gpu_cost_usd,
        monthly_usd,
        block_rate,
        decision,
    })
}
