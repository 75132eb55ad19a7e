use serde::Serialize;
use std::collections::HashSet;

use crate::models::{DateRange, TemperatureRecord};

/// The loaded readings, in file order. Read-only after load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    records: Vec<TemperatureRecord>,
}

impl Dataset {
    pub fn new(records: Vec<TemperatureRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TemperatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TemperatureRecord> {
        self.records.iter()
    }

    /// First `n` records, for previews.
    pub fn head(&self, n: usize) -> &[TemperatureRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Distinct station names in order of first appearance.
    pub fn stations(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.station.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn date_bounds(&self) -> Option<DateRange> {
        crate::processors::date_range_filter::default_range(&self.records)
    }
}

impl From<Vec<TemperatureRecord>> for Dataset {
    fn from(records: Vec<TemperatureRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a TemperatureRecord;
    type IntoIter = std::slice::Iter<'a, TemperatureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(station: &str, day: u32) -> TemperatureRecord {
        let date = NaiveDate::from_ymd_opt(2012, 1, day).unwrap();
        TemperatureRecord::new(station, date, Some(10.0), Some(20.0))
    }

    #[test]
    fn test_stations_keep_first_appearance_order() {
        let dataset = Dataset::new(vec![
            record("Valdivia", 1),
            record("Santiago", 1),
            record("Valdivia", 2),
            record("Punta Arenas", 1),
        ]);

        assert_eq!(dataset.stations(), vec!["Valdivia", "Santiago", "Punta Arenas"]);
    }

    #[test]
    fn test_head_and_bounds() {
        let dataset = Dataset::new(vec![record("Santiago", 5), record("Santiago", 2)]);

        assert_eq!(dataset.head(10).len(), 2);
        assert_eq!(dataset.head(1)[0].date, NaiveDate::from_ymd_opt(2012, 1, 5).unwrap());

        let bounds = dataset.date_bounds().unwrap();
        assert_eq!(bounds.from(), NaiveDate::from_ymd_opt(2012, 1, 2).unwrap());
        assert_eq!(bounds.to(), NaiveDate::from_ymd_opt(2012, 1, 5).unwrap());

        assert!(Dataset::default().date_bounds().is_none());
    }
}
