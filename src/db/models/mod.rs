pub mod device;
pub mod device_type;
pub mod measure;
pub mod metric;
pub mod site;

pub use device::DeviceRow;
pub use device_type::DeviceTypeRow;
pub use measure::MeasureRow;
pub use metric::MetricRow;
pub use site::SiteRow;
