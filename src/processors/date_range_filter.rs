use crate::models::{DateRange, TemperatureRecord};
use tracing::debug;

/// Records dated within `range`, both ends included.
pub fn filter_by_date_range(records: &[TemperatureRecord], range: &DateRange) -> Vec<TemperatureRecord> {
    let filtered: Vec<TemperatureRecord> = records
        .iter()
        .filter(|r| range.contains(r.date))
        .cloned()
        .collect();

    debug!(
        from = %range.from(),
        to = %range.to(),
        matched = filtered.len(),
        "Filtered by date range"
    );
    filtered
}

/// `[min(date), max(date)]` over `records`, or `None` when empty.
///
/// Call this on the station-filtered records so sparse stations get their own window.
pub fn default_range(records: &[TemperatureRecord]) -> Option<DateRange> {
    let min = records.iter().map(|r| r.date).min()?;
    let max = records.iter().map(|r| r.date).max()?;
    DateRange::new(min, max).ok()
}
