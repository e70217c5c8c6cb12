use crate::targets::PriceTargets;
use bid_types::{NormalizedResources, StorageClass};
use strum::IntoEnumIterator;

/// Monthly USD cost of the normalized resources plus the GPU cost.
pub fn monthly_cost(resources: &NormalizedResources, targets: &PriceTargets, gpu_cost: f64) -> f64 {
    let storage: f64 = StorageClass::iter()
        .map(|class| resources.storage_gb(class) as f64 * targets.storage(class))
        .sum();

    resources.cpu_cores * targets.cpu
        + resources.memory_gb * targets.memory
        + storage
        + resources.endpoints as f64 * targets.endpoint
        + resources.ips as f64 * targets.ip
        + gpu_cost
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_sum_of_all_categories() {
        let resources = NormalizedResources {
            cpu_cores: 2.0,
            memory_gb: 4.0,
            ephemeral_gb: 10,
            hdd_gb: 100,
            ssd_gb: 50,
            nvme_gb: 20,
            endpoints: 3,
            ips: 1,
        };
        let targets = PriceTargets::default();

        let expected = 2.0 * 1.60 + 4.0 * 0.80 + 10.0 * 0.02 + 100.0 * 0.01 + 50.0 * 0.03 + 20.0 * 0.04
            + 3.0 * 0.05
            + 5.00
            + 250.0;
        assert!((monthly_cost(&resources, &targets, 250.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn nothing_requested_costs_only_gpu() {
        let targets = PriceTargets::default();
        assert_eq!(monthly_cost(&NormalizedResources::default(), &targets, 0.0), 0.0);
        assert_eq!(monthly_cost(&NormalizedResources::default(), &targets, 12.5), 12.5);
    }
}
