use bid_types::{EndpointKind, NormalizedResources, ResourceUnit, StorageClass};
use tracing::debug;

const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Sums a group's resource units into per-category totals.
///
/// Storage is converted to whole gigabytes per volume before it is summed,
/// so volumes under 1 GiB contribute nothing. Integer totals saturate. Volumes whose class has no
/// price tier are left out of every total.
pub fn normalize(units: &[ResourceUnit]) -> NormalizedResources {
    let mut totals = NormalizedResources::default();

    for unit in units {
        let count = unit.repetitions();

        totals.cpu_cores += unit.cpu as f64 / 1000.0 * count as f64;
        totals.memory_gb += unit.memory as f64 / BYTES_PER_GB as f64 * count as f64;

        for volume in &unit.storage {
            let tag = volume.class_tag();
            match StorageClass::from_tag(tag) {
                Some(class) => totals.add_storage(class, (volume.size / BYTES_PER_GB).saturating_mul(count)),
                None => debug!(volume = %volume.name, class = %tag, "storage class has no price tier, skipping"),
            }
        }

        for endpoint in &unit.endpoints {
            totals.endpoints = totals.endpoints.saturating_add(count);
            if endpoint.kind == EndpointKind::LeasedIp {
                totals.ips = totals.ips.saturating_add(count);
            }
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use bid_types::{Attribute, Endpoint, StorageEntry};

    fn volume(name: &str, class: Option<&str>, size: u64) -> StorageEntry {
        StorageEntry {
            name: name.to_string(),
            size,
            attributes: class
                .map(|c| vec![Attribute { key: "class".into(), value: c.into() }])
                .unwrap_or_default(),
        }
    }

    #[test]
    fn cpu_is_summed_in_cores() {
        let units = vec![
            ResourceUnit { count: 3, cpu: 250, ..Default::default() },
            ResourceUnit { count: 1, cpu: 1500, ..Default::default() },
        ];
        let totals = normalize(&units);
        assert!((totals.cpu_cores - (250.0 * 3.0 + 1500.0) / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn doubling_memory_doubles_gigabytes() {
        let single = normalize(&[ResourceUnit { memory: 805_306_368, ..Default::default() }]);
        let double = normalize(&[ResourceUnit { memory: 2 * 805_306_368, ..Default::default() }]);
        assert!((single.memory_gb - 0.75).abs() < 1e-12);
        assert!((double.memory_gb - 2.0 * single.memory_gb).abs() < 1e-12);
    }

    #[test]
    fn storage_is_classified_and_truncated() {
        let unit = ResourceUnit {
            count: 2,
            storage: vec![
                volume("default", None, 5 * BYTES_PER_GB + 10),
                volume("data", Some("beta1"), 3 * BYTES_PER_GB),
                volume("cache", Some("beta2"), BYTES_PER_GB - 1),
                volume("beta3", None, 4 * BYTES_PER_GB),
            ],
            ..Default::default()
        };

        let totals = normalize(&[unit]);
        assert_eq!(totals.ephemeral_gb, 10);
        assert_eq!(totals.hdd_gb, 6);
        assert_eq!(totals.ssd_gb, 0);
        assert_eq!(totals.nvme_gb, 8);
    }

    #[test]
    fn unknown_storage_class_is_dropped() {
        let unit = ResourceUnit {
            storage: vec![volume("data", None, 10 * BYTES_PER_GB), volume("x", Some("gold"), BYTES_PER_GB)],
            ..Default::default()
        };
        let totals = normalize(&[unit]);
        assert_eq!(totals, NormalizedResources::default());
    }

    #[test]
    fn leased_ips_count_as_endpoints_too() {
        let unit = ResourceUnit {
            count: 2,
            endpoints: vec![
                Endpoint { kind: EndpointKind::SharedHttp },
                Endpoint { kind: EndpointKind::RandomPort },
                Endpoint { kind: EndpointKind::LeasedIp },
            ],
            ..Default::default()
        };
        let totals = normalize(&[unit]);
        assert_eq!(totals.endpoints, 6);
        assert_eq!(totals.ips, 2);
    }

    #[test]
    fn huge_volumes_saturate_instead_of_overflowing() {
        let unit = ResourceUnit {
            count: u32::MAX,
            storage: vec![volume("default", None, u64::MAX), volume("data", Some("beta3"), u64::MAX)],
            endpoints: vec![Endpoint { kind: EndpointKind::LeasedIp }],
            ..Default::default()
        };
        let totals = normalize(&[unit.clone(), unit]);
        assert_eq!(totals.ephemeral_gb, u64::MAX);
        assert_eq!(totals.nvme_gb, u64::MAX);
        assert_eq!(totals.endpoints, 2 * u64::from(u32::MAX));
    }

    #[test]
    fn empty_request_is_all_zero() {
        assert_eq!(normalize(&[]), NormalizedResources::default());
    }
}
