use crate::models::{TemperatureColumn, TemperatureRecord};
use tracing::debug;

/// Records whose `column` value is strictly greater than `threshold`.
///
/// Missing readings never qualify.
pub fn select_extreme_days(
    records: &[TemperatureRecord],
    threshold: f32,
    column: TemperatureColumn,
) -> Vec<TemperatureRecord> {
    let selected: Vec<TemperatureRecord> = records
        .iter()
        .filter(|r| r.value(column).is_some_and(|t| t > threshold))
        .cloned()
        .collect();

    debug!(%column, threshold, selected = selected.len(), "Selected extreme days");
    selected
}
