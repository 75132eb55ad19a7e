use crate::models::{TemperatureColumn, TemperatureRecord};
use serde::Serialize;
use std::fmt;

/// The fixed set of statistics reported per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatName {
    Count,
    Mean,
    Std,
    Min,
    P25,
    P50,
    P75,
    Max,
}

impl StatName {
    pub const ALL: [StatName; 8] = [
        StatName::Count,
        StatName::Mean,
        StatName::Std,
        StatName::Min,
        StatName::P25,
        StatName::P50,
        StatName::P75,
        StatName::Max,
    ];

    /// Row label used in the rendered statistics table.
    pub fn label(&self) -> &'static str {
        match self {
            StatName::Count => "Cantidad",
            StatName::Mean => "Promedio",
            StatName::Std => "Desviación Estándar",
            StatName::Min => "Mínimo",
            StatName::P25 => "Percentil 25",
            StatName::P50 => "Percentil 50",
            StatName::P75 => "Percentil 75",
            StatName::Max => "Máximo",
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            StatName::Count => "count",
            StatName::Mean => "mean",
            StatName::Std => "std",
            StatName::Min => "min",
            StatName::P25 => "25%",
            StatName::P50 => "50%",
            StatName::P75 => "75%",
            StatName::Max => "max",
        };
        write!(f, "{}", key)
    }
}

/// Descriptive statistics of one column. Every field is `None` for an empty
/// input. When records exist but the column is entirely missing, `count` is
/// `Some(0)` and the rest `None`. `std` is also `None` for a single value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnStats {
    pub count: Option<usize>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnStats {
    pub fn get(&self, stat: StatName) -> Option<f64> {
        match stat {
            StatName::Count => self.count.map(|c| c as f64),
            StatName::Mean => self.mean,
            StatName::Std => self.std,
            StatName::Min => self.min,
            StatName::P25 => self.p25,
            StatName::P50 => self.p50,
            StatName::P75 => self.p75,
            StatName::Max => self.max,
        }
    }

    /// True when no non-missing value contributed.
    pub fn is_empty(&self) -> bool {
        self.count.unwrap_or(0) == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatSummary {
    pub t_min: ColumnStats,
    pub t_max: ColumnStats,
}

impl StatSummary {
    pub fn column(&self, column: TemperatureColumn) -> &ColumnStats {
        match column {
            TemperatureColumn::Min => &self.t_min,
            TemperatureColumn::Max => &self.t_max,
        }
    }

    /// Table with one row per statistic and one column per temperature.
    pub fn to_table(&self) -> String {
        let cell = |value: Option<f64>| match value {
            Some(v) => format!("{:.6}", v),
            None => "-".to_string(),
        };

        let mut out = format!(
            "{:<22}{:>20}{:>20}\n",
            "",
            TemperatureColumn::Min.label(),
            TemperatureColumn::Max.label()
        );
        for stat in StatName::ALL {
            let (min_cell, max_cell) = match stat {
                StatName::Count => (
                    self.t_min.count.map_or("-".to_string(), |c| c.to_string()),
                    self.t_max.count.map_or("-".to_string(), |c| c.to_string()),
                ),
                _ => (cell(self.t_min.get(stat)), cell(self.t_max.get(stat))),
            };
            out.push_str(&format!("{:<22}{:>20}{:>20}\n", stat.label(), min_cell, max_cell));
        }
        out
    }
}

/// Statistics of tMin and tMax over `records`, each column independently.
pub fn summarize(records: &[TemperatureRecord]) -> StatSummary {
    let column_stats = |column: TemperatureColumn| -> ColumnStats {
        let values: Vec<f64> = records
            .iter()
            .filter_map(|r| r.value(column))
            .map(f64::from)
            .collect();

        if values.is_empty() && !records.is_empty() {
            ColumnStats {
                count: Some(0),
                ..ColumnStats::default()
            }
        } else {
            describe(&values)
        }
    };

    StatSummary {
        t_min: column_stats(TemperatureColumn::Min),
        t_max: column_stats(TemperatureColumn::Max),
    }
}

/// Sample statistics of non-missing `values`.
pub fn describe(values: &[f64]) -> ColumnStats {
    if values.is_empty() {
        return ColumnStats::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let squares: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (squares / (n as f64 - 1.0)).sqrt()
    });

    ColumnStats {
        count: Some(n),
        mean: Some(mean),
        std,
        min: sorted.first().copied(),
        p25: percentile(&sorted, 0.25),
        p50: percentile(&sorted, 0.50),
        p75: percentile(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

/// Linear interpolation between order statistics: rank = p * (n - 1).
/// `sorted` must be ascending.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}
