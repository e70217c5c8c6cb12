use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Storage tiers a provider prices separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum StorageClass {
    Ephemeral,
    Hdd,
    Ssd,
    Nvme,
}

impl StorageClass {
    /// Maps a provider storage-class tag onto a priced tier.
    ///
    /// `default` is the tag deployments use for ephemeral volumes; the
    /// persistent tiers are exposed as `beta1` (HDD), `beta2` (SSD) and
    /// `beta3` (NVMe). Anything else has no price and returns `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ephemeral" | "default" => Some(StorageClass::Ephemeral),
            "beta1" => Some(StorageClass::Hdd),
            "beta2" => Some(StorageClass::Ssd),
            "beta3" => Some(StorageClass::Nvme),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EndpointKind {
    #[default]
    SharedHttp,
    RandomPort,
    LeasedIp,
}

/// Per-category totals for a whole request, already multiplied by each
/// unit's repetition count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedResources {
    pub cpu_cores: f64,
    pub memory_gb: f64,
    pub ephemeral_gb: u64,
    pub hdd_gb: u64,
    pub ssd_gb: u64,
    pub nvme_gb: u64,
    pub endpoints: u64,
    pub ips: u64,
}

impl NormalizedResources {
    pub fn storage_gb(&self, class: StorageClass) -> u64 {
        match class {
            StorageClass::Ephemeral => self.ephemeral_gb,
            StorageClass::Hdd => self.hdd_gb,
            StorageClass::Ssd => self.ssd_gb,
            StorageClass::Nvme => self.nvme_gb,
        }
    }

    pub fn add_storage(&mut self, class: StorageClass, gb: u64) {
        let slot = match class {
            StorageClass::Ephemeral => &mut self.ephemeral_gb,
            StorageClass::Hdd => &mut self.hdd_gb,
            StorageClass::Ssd => &mut self.ssd_gb,
            StorageClass::Nvme => &mut self.nvme_gb,
        };
        *slot = slot.saturating_add(gb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn storage_tags_map_to_tiers() {
        assert_eq!(StorageClass::from_tag("default"), Some(StorageClass::Ephemeral));
        assert_eq!(StorageClass::from_tag("ephemeral"), Some(StorageClass::Ephemeral));
        assert_eq!(StorageClass::from_tag("beta1"), Some(StorageClass::Hdd));
        assert_eq!(StorageClass::from_tag("beta2"), Some(StorageClass::Ssd));
        assert_eq!(StorageClass::from_tag("beta3"), Some(StorageClass::Nvme));
        assert_eq!(StorageClass::from_tag("data"), None);
        assert_eq!(StorageClass::from_tag("BETA3"), None);
    }

    #[test]
    fn add_storage_accumulates_per_class() {
        let mut totals = NormalizedResources::default();
        for class in StorageClass::iter() {
            totals.add_storage(class, 2);
        }
        totals.add_storage(StorageClass::Nvme, 3);

        assert_eq!(totals.storage_gb(StorageClass::Ephemeral), 2);
        assert_eq!(totals.storage_gb(StorageClass::Nvme), 5);
        assert_eq!(StorageClass::Nvme.to_string(), "nvme");
    }

    #[test]
    fn add_storage_saturates() {
        let mut totals = NormalizedResources::default();
        totals.add_storage(StorageClass::Hdd, u64::MAX);
        totals.add_storage(StorageClass::Hdd, 7);
        assert_eq!(totals.hdd_gb, u64::MAX);
    }
}
