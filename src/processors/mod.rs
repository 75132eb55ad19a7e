pub mod date_range_filter;
pub mod extreme_day_selector;
pub mod monthly_aggregator;
pub mod pipeline;
pub mod station_filter;

pub use date_range_filter::{default_range, filter_by_date_range};
pub use extreme_day_selector::select_extreme_days;
pub use monthly_aggregator::{monthly_averages, MonthlyAverage};
pub use pipeline::{ExplorationPipeline, ExplorationReport, FilteredSet};
pub use station_filter::filter_by_station;
