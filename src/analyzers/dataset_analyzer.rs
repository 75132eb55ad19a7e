use crate::models::{Dataset, DateRange, TemperatureRecord};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSummary {
    pub name: String,
    pub records: usize,
    pub date_range: Option<DateRange>,
    pub missing_t_min: usize,
    pub missing_t_max: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetOverview {
    pub total_records: usize,
    pub stations: Vec<StationSummary>,
    pub date_range: Option<DateRange>,
    pub missing_t_min: usize,
    pub missing_t_max: usize,
}

impl DatasetOverview {
    pub fn missing_t_min_percentage(&self) -> f64 {
        percentage(self.missing_t_min, self.total_records)
    }

    pub fn missing_t_max_percentage(&self) -> f64 {
        percentage(self.missing_t_max, self.total_records)
    }

    pub fn summary(&self) -> String {
        let date_range = match &self.date_range {
            Some(range) => format!("{} to {} ({} days)", range.from(), range.to(), range.num_days()),
            None => "No records".to_string(),
        };

        format!(
            "Stations: {} stations\n\
            Date Range: {}\n\
            Records: {} total\n\
            Missing readings: {:.1}% TMin, {:.1}% TMax",
            self.stations.len(),
            date_range,
            self.total_records,
            self.missing_t_min_percentage(),
            self.missing_t_max_percentage()
        )
    }

    /// One line per station: name, record count and covered dates.
    pub fn station_table(&self) -> String {
        let width = self
            .stations
            .iter()
            .map(|s| s.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Estación".chars().count());

        let mut out = format!("{:<width$}  {:>8}  {:<10}  {:<10}\n", "Estación", "Registros", "Desde", "Hasta");
        for station in &self.stations {
            let (from, to) = station
                .date_range
                .map(|r| (r.from().to_string(), r.to().to_string()))
                .unwrap_or_default();
            out.push_str(&format!(
                "{:<width$}  {:>8}  {:<10}  {:<10}\n",
                station.name, station.records, from, to
            ));
        }
        out
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

pub struct DatasetAnalyzer;

impl DatasetAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, dataset: &Dataset) -> DatasetOverview {
        let mut per_station: HashMap<&str, Vec<&TemperatureRecord>> = HashMap::new();
        for record in dataset {
            per_station.entry(record.station.as_str()).or_default().push(record);
        }

        let stations = dataset
            .stations()
            .into_iter()
            .map(|name| {
                let records = per_station.remove(name).unwrap_or_default();
                self.summarize_station(name, &records)
            })
            .collect();

        DatasetOverview {
            total_records: dataset.len(),
            stations,
            date_range: dataset.date_bounds(),
            missing_t_min: dataset.iter().filter(|r| r.t_min.is_none()).count(),
            missing_t_max: dataset.iter().filter(|r| r.t_max.is_none()).count(),
        }
    }

    fn summarize_station(&self, name: &str, records: &[&TemperatureRecord]) -> StationSummary {
        let min_date = records.iter().map(|r| r.date).min();
        let max_date = records.iter().map(|r| r.date).max();
        let date_range = match (min_date, max_date) {
            (Some(from), Some(to)) => DateRange::new(from, to).ok(),
            _ => None,
        };

        StationSummary {
            name: name.to_string(),
            records: records.len(),
            date_range,
            missing_t_min: records.iter().filter(|r| r.t_min.is_none()).count(),
            missing_t_max: records.iter().filter(|r| r.t_max.is_none()).count(),
        }
    }
}

impl Default for DatasetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
