use crate::models::TemperatureRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean readings for one calendar month, merged across years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverage {
    pub month: u32,
    pub avg_t_min: Option<f64>,
    pub avg_t_max: Option<f64>,
    pub t_min_count: usize,
    pub t_max_count: usize,
}

#[derive(Debug, Default)]
struct MonthBucket {
    t_min_sum: f64,
    t_min_count: usize,
    t_max_sum: f64,
    t_max_count: usize,
}

impl MonthBucket {
    fn add(&mut self, record: &TemperatureRecord) {
        if let Some(t) = record.t_min {
            self.t_min_sum += t as f64;
            self.t_min_count += 1;
        }
        if let Some(t) = record.t_max {
            self.t_max_sum += t as f64;
            self.t_max_count += 1;
        }
    }

    fn into_average(self, month: u32) -> MonthlyAverage {
        let mean = |sum: f64, count: usize| (count > 0).then(|| sum / count as f64);

        MonthlyAverage {
            month,
            avg_t_min: mean(self.t_min_sum, self.t_min_count),
            avg_t_max: mean(self.t_max_sum, self.t_max_count),
            t_min_count: self.t_min_count,
            t_max_count: self.t_max_count,
        }
    }
}

/// One row per month number present in `records`, ascending.
///
/// A month whose readings are all missing for a column keeps its row with `None`.
pub fn monthly_averages(records: &[TemperatureRecord]) -> Vec<MonthlyAverage> {
    let mut buckets: BTreeMap<u32, MonthBucket> = BTreeMap::new();

    for record in records {
        buckets.entry(record.month()).or_default().add(record);
    }

    buckets
        .into_iter()
        .map(|(month, bucket)| bucket.into_average(month))
        .collect()
}
