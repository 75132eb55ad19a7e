use crate::models::TemperatureRecord;
use tracing::debug;

/// Records whose station name equals `station` exactly (case-sensitive).
///
/// An unknown station yields an empty `Vec`, not an error.
pub fn filter_by_station(records: &[TemperatureRecord], station: &str) -> Vec<TemperatureRecord> {
    let filtered: Vec<TemperatureRecord> = records
        .iter()
        .filter(|r| r.station == station)
        .cloned()
        .collect();

    debug!(station, matched = filtered.len(), total = records.len(), "Filtered by station");
    filtered
}
