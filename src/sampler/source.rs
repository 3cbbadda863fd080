use rand::Rng;

use crate::db::models::{DeviceRow, MetricRow};

/// A source of readings for a metric. Metrics name their source in the
/// `sampler` column; real hardware integrations would add implementations
/// here and register them in [`resolve`].
pub trait ReadingSource: Send + Sync {
    fn name(&self) -> &'static str;
    fn sample(&self, metric: &MetricRow, device: &DeviceRow) -> f64;
}

/// Stand-in source producing a uniform random value in [1, 100).
pub struct MockSource;

impl ReadingSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn sample(&self, _metric: &MetricRow, _device: &DeviceRow) -> f64 {
        rand::thread_rng().gen_range(1.0..100.0)
    }
}

static MOCK: MockSource = MockSource;

/// Look up a reading source by the name stored on the metric.
pub fn resolve(name: &str) -> Option<&'static dyn ReadingSource> {
    match name {
        "mock" => Some(&MOCK),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (MetricRow, DeviceRow) {
        (
            MetricRow {
                id: 1,
                name: "power".to_string(),
                unit: "kW".to_string(),
                sampler: "mock".to_string(),
            },
            DeviceRow {
                id: 1,
                name: "inverter-1".to_string(),
                site_id: 1,
                device_type_id: 1,
                is_active: true,
            },
        )
    }

    #[test]
    fn mock_source_stays_in_range() {
        let (metric, device) = fixture();
        for _ in 0..1000 {
            let value = MockSource.sample(&metric, &device);
            assert!((1.0..100.0).contains(&value));
        }
    }

    #[test]
    fn resolve_knows_mock_only() {
        assert!(resolve("mock").is_some());
        assert!(resolve("modbus").is_none());
        assert!(resolve("").is_none());
    }
}
