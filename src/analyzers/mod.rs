pub mod dataset_analyzer;
pub mod descriptive_stats;

pub use dataset_analyzer::{DatasetAnalyzer, DatasetOverview, StationSummary};
pub use descriptive_stats::{describe, summarize, ColumnStats, StatName, StatSummary};
