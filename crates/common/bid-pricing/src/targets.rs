use crate::gpu::GpuPriceTable;
use bid_types::StorageClass;

pub const DEFAULT_CPU_TARGET: f64 = 1.60;
pub const DEFAULT_MEMORY_TARGET: f64 = 0.80;
pub const DEFAULT_HD_EPHEMERAL_TARGET: f64 = 0.02;
pub const DEFAULT_HD_PERS_HDD_TARGET: f64 = 0.01;
pub const DEFAULT_HD_PERS_SSD_TARGET: f64 = 0.03;
pub const DEFAULT_HD_PERS_NVME_TARGET: f64 = 0.04;
pub const DEFAULT_ENDPOINT_TARGET: f64 = 0.05;
pub const DEFAULT_IP_TARGET: f64 = 5.00;

/// Monthly USD prices the provider wants per unit of each resource.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTargets {
    /// Per CPU core.
    pub cpu: f64,
    /// Per GB of memory.
    pub memory: f64,
    /// Per GB of ephemeral storage.
    pub hd_ephemeral: f64,
    pub hd_pers_hdd: f64,
    pub hd_pers_ssd: f64,
    pub hd_pers_nvme: f64,
    /// Per endpoint.
    pub endpoint: f64,
    /// Per leased IP.
    pub ip: f64,
    pub gpu_prices: GpuPriceTable,
}

impl Default for PriceTargets {
    fn default() -> Self {
        Self {
            cpu: DEFAULT_CPU_TARGET,
            memory: DEFAULT_MEMORY_TARGET,
            hd_ephemeral: DEFAULT_HD_EPHEMERAL_TARGET,
            hd_pers_hdd: DEFAULT_HD_PERS_HDD_TARGET,
            hd_pers_ssd: DEFAULT_HD_PERS_SSD_TARGET,
            hd_pers_nvme: DEFAULT_HD_PERS_NVME_TARGET,
            endpoint: DEFAULT_ENDPOINT_TARGET,
            ip: DEFAULT_IP_TARGET,
            gpu_prices: GpuPriceTable::default(),
        }
    }
}

impl PriceTargets {
    pub fn storage(&self, class: StorageClass) -> f64 {
        match class {
            StorageClass::Ephemeral => self.hd_ephemeral,
            StorageClass::Hdd => self.hd_pers_hdd,
            StorageClass::Ssd => self.hd_pers_ssd,
            StorageClass::Nvme => self.hd_pers_nvme,
        }
    }
}
