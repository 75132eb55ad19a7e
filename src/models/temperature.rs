use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One station-day reading. Missing readings are `None`, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRecord {
    pub station: String,
    pub date: NaiveDate,
    pub t_min: Option<f32>,
    pub t_max: Option<f32>,
}

/// Which temperature column an operation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureColumn {
    Min,
    Max,
}

impl TemperatureColumn {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "min" | "tmin" | "tminima" => Some(TemperatureColumn::Min),
            "max" | "tmax" | "tmaxima" => Some(TemperatureColumn::Max),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureColumn::Min => "Temperatura Mínima",
            TemperatureColumn::Max => "Temperatura Máxima",
        }
    }
}

impl fmt::Display for TemperatureColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureColumn::Min => write!(f, "TMin"),
            TemperatureColumn::Max => write!(f, "TMax"),
        }
    }
}

impl TemperatureRecord {
    pub fn new(
        station: impl Into<String>,
        date: NaiveDate,
        t_min: Option<f32>,
        t_max: Option<f32>,
    ) -> Self {
        Self {
            station: station.into(),
            date,
            t_min,
            t_max,
        }
    }

    /// Compose a calendar date from separate year/month/day fields.
    pub fn date_from_parts(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    pub fn value(&self, column: TemperatureColumn) -> Option<f32> {
        match column {
            TemperatureColumn::Min => self.t_min,
            TemperatureColumn::Max => self.t_max,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn has_missing_data(&self) -> bool {
        self.t_min.is_none() || self.t_max.is_none()
    }
}
