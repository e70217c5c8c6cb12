#![forbid(unsafe_code)]

pub mod denom;
pub mod error;
pub mod request;
pub mod resource;

pub use denom::{SettlementDenom, NATIVE_DENOM, STABLE_DENOMS};
pub use error::TypesError;
pub use request::{Attribute, BidRequest, Endpoint, GpuSpec, PriceCeiling, ResourceUnit, StorageEntry};
pub use resource::{EndpointKind, NormalizedResources, StorageClass};

/// Output precision used when the request leaves it unset or zero.
pub const DEFAULT_PRICE_PRECISION: u32 = 6;

/// Largest precision honoured; decimal coin amounts carry 18 fractional digits.
pub const MAX_PRICE_PRECISION: u32 = 18;
