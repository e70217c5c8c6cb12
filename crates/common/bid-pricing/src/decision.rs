use crate::error::PricingError;
use crate::rate::{BlockRate, MICRO_UNITS};
use bid_types::{BidRequest, SettlementDenom};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The requester's side of the deal: what they pay in, how much at most,
/// and how precisely the answer should be written.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub denom: SettlementDenom,
    pub ceiling: Decimal,
    pub precision: u32,
}

impl PriceQuote {
    /// Extracts the quote from a request. A missing denom or a zero amount
    /// means the request cannot be priced; an unknown denom is rejected
    /// before any rate is computed.
    pub fn from_request(request: &BidRequest) -> Result<Self, PricingError> {
        let price = request.price.as_ref().ok_or(PricingError::PriceMissing)?;
        let amount = price.amount.trim();
        if price.denom.is_empty() || amount.is_empty() {
            return Err(PricingError::PriceMissing);
        }

        let ceiling = Decimal::from_str(amount).map_err(|e| PricingError::InvalidCeiling(format!("{amount}: {e}")))?;
        if ceiling.is_zero() {
            return Err(PricingError::PriceMissing);
        }

        let denom = SettlementDenom::parse(&price.denom);
        if let SettlementDenom::Unsupported(d) = denom {
            return Err(PricingError::UnsupportedDenom(d));
        }

        Ok(Self {
            denom,
            ceiling,
            precision: request.precision(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BidDecision {
    /// The provider bids at `price`, formatted at the requested precision.
    Priced { price: String },
    /// The ceiling is below what the provider requires.
    TooLow { required: String, denom: SettlementDenom },
}

impl BidDecision {
    pub fn is_priced(&self) -> bool {
        matches!(self, BidDecision::Priced { .. })
    }
}

impl fmt::Display for BidDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidDecision::Priced { price } => f.write_str(price),
            BidDecision::TooLow { required, denom } => {
                write!(f, "requested rate is too low. min expected {required}{denom}")
            }
        }
    }
}

/// Compares the required per-block rate with the ceiling, in the
/// micro-units of the quote's denomination. A rate equal to the ceiling
/// is accepted.
pub fn decide(rate: &BlockRate, quote: &PriceQuote) -> Result<BidDecision, PricingError> {
    let required = match &quote.denom {
        SettlementDenom::Native => rate.per_block_native,
        SettlementDenom::Stable(_) => rate.per_block_usd * MICRO_UNITS,
        SettlementDenom::Unsupported(d) => return Err(PricingError::UnsupportedDenom(d.clone())),
    };

    let ceiling = quote
        .ceiling
        .to_f64()
        .ok_or_else(|| PricingError::InvalidCeiling(quote.ceiling.to_string()))?;
    let formatted = format!("{:.*}", quote.precision as usize, required);

    if required > ceiling {
        Ok(BidDecision::TooLow {
            required: formatted,
            denom: quote.denom.clone(),
        })
    } else {
        Ok(BidDecision::Priced { price: formatted })
    }
}
