use crate::analyzers::descriptive_stats::{summarize, StatSummary};
use crate::error::Result;
use crate::models::{Dataset, DateRange, TemperatureColumn, TemperatureRecord};
use crate::processors::date_range_filter::{default_range, filter_by_date_range};
use crate::processors::extreme_day_selector::select_extreme_days;
use crate::processors::monthly_aggregator::{monthly_averages, MonthlyAverage};
use crate::processors::station_filter::filter_by_station;
use crate::utils::constants::DEFAULT_EXTREME_THRESHOLD;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// Everything derived from one station + date-range selection.
#[derive(Debug, Clone, Serialize)]
pub struct ExplorationReport {
    pub station: String,
    /// Window actually applied; `None` when the station has no records.
    pub date_range: Option<DateRange>,
    /// `[min, max]` date of the station's records, the default selection.
    pub available_range: Option<DateRange>,
    pub records: Vec<TemperatureRecord>,
    pub statistics: StatSummary,
    pub monthly_averages: Vec<MonthlyAverage>,
    pub extreme_threshold: f32,
    pub extreme_column: TemperatureColumn,
    pub extreme_days: Vec<TemperatureRecord>,
}

impl ExplorationReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> String {
        let Some(range) = &self.date_range else {
            return format!("No records for station '{}'\n", self.station);
        };

        let mut out = format!(
            "Temperaturas en {} del {} al {} ({} registros)\n",
            self.station,
            range.from(),
            range.to(),
            self.records.len()
        );

        out.push_str("\nEstadísticas de la estación seleccionada\n");
        out.push_str(&self.statistics.to_table());

        out.push_str("\nPromedios mensuales\n");
        out.push_str(&format!("{:>4}  {:>10}  {:>10}\n", "Mes", "TMin", "TMax"));
        for month in &self.monthly_averages {
            out.push_str(&format!(
                "{:>4}  {:>10}  {:>10}\n",
                month.month,
                format_optional(month.avg_t_min),
                format_optional(month.avg_t_max)
            ));
        }

        out.push_str(&format!(
            "\nDías con {} > {:.1}°C: {}\n",
            self.extreme_column,
            self.extreme_threshold,
            self.extreme_days.len()
        ));
        for day in &self.extreme_days {
            out.push_str(&format!(
                "  {}  TMin {}  TMax {}\n",
                day.date,
                format_optional(day.t_min.map(f64::from)),
                format_optional(day.t_max.map(f64::from))
            ));
        }

        out
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

/// Records matching one station + date-range selection.
#[derive(Debug, Clone, Default)]
pub struct FilteredSet {
    pub records: Vec<TemperatureRecord>,
    /// Window applied; `None` when the station has no records.
    pub date_range: Option<DateRange>,
    /// The station's own `[min, max]` date.
    pub available_range: Option<DateRange>,
}

/// Station filter → date-range filter → statistics, monthly averages and
/// extreme days, each computed from the same filtered set.
pub struct ExplorationPipeline {
    extreme_threshold: f32,
    extreme_column: TemperatureColumn,
}

impl ExplorationPipeline {
    pub fn new() -> Self {
        Self {
            extreme_threshold: DEFAULT_EXTREME_THRESHOLD,
            extreme_column: TemperatureColumn::Max,
        }
    }

    pub fn with_extreme_threshold(mut self, threshold: f32) -> Self {
        self.extreme_threshold = threshold;
        self
    }

    pub fn with_extreme_column(mut self, column: TemperatureColumn) -> Self {
        self.extreme_column = column;
        self
    }

    /// Records for `station` within `[from, to]`. Unset bounds default to
    /// the station's own first/last date, and the applied window never
    /// extends past them.
    ///
    /// An unknown station yields an empty set without a range.
    pub fn filtered_set(
        &self,
        dataset: &Dataset,
        station: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<FilteredSet> {
        if let (Some(from), Some(to)) = (from, to) {
            DateRange::new(from, to)?;
        }

        let station_records = filter_by_station(dataset.records(), station);

        let Some(available) = default_range(&station_records) else {
            return Ok(FilteredSet::default());
        };

        let requested = DateRange::new(
            from.unwrap_or_else(|| available.from()),
            to.unwrap_or_else(|| available.to()),
        )?;
        // A window outside the station's dates stays as requested and matches nothing
        let range = requested.clamp_to(&available).unwrap_or(requested);

        Ok(FilteredSet {
            records: filter_by_date_range(&station_records, &range),
            date_range: Some(range),
            available_range: Some(available),
        })
    }

    pub fn run(
        &self,
        dataset: &Dataset,
        station: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<ExplorationReport> {
        let FilteredSet {
            records,
            date_range,
            available_range,
        } = self.filtered_set(dataset, station, from, to)?;

        let statistics = summarize(&records);
        let monthly_averages = monthly_averages(&records);
        let extreme_days = select_extreme_days(&records, self.extreme_threshold, self.extreme_column);

        info!(
            station,
            records = records.len(),
            extreme_days = extreme_days.len(),
            "Exploration complete"
        );

        Ok(ExplorationReport {
            station: station.to_string(),
            date_range,
            available_range,
            records,
            statistics,
            monthly_averages,
            extreme_threshold: self.extreme_threshold,
            extreme_column: self.extreme_column,
            extreme_days,
        })
    }
}

impl Default for ExplorationPipeline {
    fn default() -> Self {
        Self::new()
    }
}
