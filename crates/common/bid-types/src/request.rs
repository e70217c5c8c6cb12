use crate::error::TypesError;
use crate::resource::EndpointKind;
use crate::{DEFAULT_PRICE_PRECISION, MAX_PRICE_PRECISION};
use serde::{Deserialize, Serialize};

/// A bid request as handed over by the provider: the resources of one
/// deployment group plus the requester's price ceiling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BidRequest {
    #[serde(default)]
    pub price: Option<PriceCeiling>,

    /// Fractional digits of the reported price. Zero means "use the default".
    #[serde(default)]
    pub price_precision: u32,

    #[serde(default)]
    pub resources: Vec<ResourceUnit>,
}

impl BidRequest {
    pub fn from_json(doc: &str) -> Result<Self, TypesError> {
        Ok(serde_json::from_str(doc)?)
    }

    /// Output precision: the default when unset, capped at
    /// [`MAX_PRICE_PRECISION`].
    pub fn precision(&self) -> u32 {
        if self.price_precision == 0 {
            DEFAULT_PRICE_PRECISION
        } else {
            self.price_precision.min(MAX_PRICE_PRECISION)
        }
    }
}

/// Maximum price the requester will pay per block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceCeiling {
    #[serde(default)]
    pub denom: String,

    /// Decimal amount, kept as text so no precision is lost before parsing.
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceUnit {
    #[serde(default = "default_count")]
    pub count: u32,

    /// CPU in milli-cores.
    #[serde(default)]
    pub cpu: u64,

    /// Memory in bytes.
    #[serde(default)]
    pub memory: u64,

    #[serde(default)]
    pub storage: Vec<StorageEntry>,

    #[serde(default)]
    pub gpu: Option<GpuSpec>,

    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

fn default_count() -> u32 {
    1
}

impl ResourceUnit {
    /// Repetition count, never below one.
    pub fn repetitions(&self) -> u64 {
        u64::from(self.count.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageEntry {
    #[serde(default)]
    pub name: String,

    /// Size in bytes.
    #[serde(default)]
    pub size: u64,

    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl StorageEntry {
    /// The `class` attribute if one is set, otherwise the volume name.
    pub fn class_tag(&self) -> &str {
        self.attributes
            .iter()
            .find(|attr| attr.key == "class")
            .map(|attr| attr.value.as_str())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GpuSpec {
    #[serde(default)]
    pub units: u32,

    /// Attribute pairs whose keys encode the GPU as a path, e.g.
    /// `vendor/nvidia/model/a100/ram/80Gi/interface/sxm4`.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default)]
    pub kind: EndpointKind,
}
