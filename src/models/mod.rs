pub mod criteria;
pub mod dataset;
pub mod temperature;

pub use criteria::{DateRange, FilterCriteria};
pub use dataset::Dataset;
pub use temperature::{TemperatureColumn, TemperatureRecord};
