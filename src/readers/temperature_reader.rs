use crate::error::{ProcessingError, Result};
use crate::models::{Dataset, TemperatureRecord};
use crate::utils::constants::{
    COL_DAY, COL_MONTH, COL_STATION, COL_T_MAX, COL_T_MIN, COL_YEAR, DEFAULT_DELIMITER,
};
use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info, warn};

/// What to do with a row whose year/month/day do not form a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    /// Fail the whole load on the first malformed row.
    #[default]
    Reject,
    /// Drop the row and count it in the [`LoadReport`].
    Skip,
}

impl MalformedRowPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reject" => Some(MalformedRowPolicy::Reject),
            "skip" => Some(MalformedRowPolicy::Skip),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub skipped_rows: usize,
    /// Input was not valid UTF-8 and was decoded as Windows-1252.
    pub legacy_encoding: bool,
}

/// Positions of the required columns within the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    station: usize,
    year: usize,
    month: usize,
    day: usize,
    t_min: usize,
    t_max: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| ProcessingError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            station: position(COL_STATION)?,
            year: position(COL_YEAR)?,
            month: position(COL_MONTH)?,
            day: position(COL_DAY)?,
            t_min: position(COL_T_MIN)?,
            t_max: position(COL_T_MAX)?,
        })
    }
}

pub struct TemperatureReader {
    delimiter: u8,
    malformed_rows: MalformedRowPolicy,
}

impl TemperatureReader {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            malformed_rows: MalformedRowPolicy::Reject,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_malformed_row_policy(mut self, policy: MalformedRowPolicy) -> Self {
        self.malformed_rows = policy;
        self
    }

    /// Read the dataset from a CSV file
    pub fn read_dataset(&self, path: &Path) -> Result<Dataset> {
        self.read_dataset_with_report(path).map(|(dataset, _)| dataset)
    }

    /// Read the dataset from a CSV file, also returning load counters
    pub fn read_dataset_with_report(&self, path: &Path) -> Result<(Dataset, LoadReport)> {
        let bytes = std::fs::read(path)?;
        let (dataset, report) = self.read_from_bytes(&bytes)?;

        info!(
            path = %path.display(),
            records = dataset.len(),
            skipped = report.skipped_rows,
            "Loaded temperature dataset"
        );

        Ok((dataset, report))
    }

    pub fn read_from_bytes(&self, bytes: &[u8]) -> Result<(Dataset, LoadReport)> {
        let (content, legacy_encoding) = decode_input(bytes);
        if legacy_encoding {
            warn!("Input is not valid UTF-8, decoded as Windows-1252");
        }

        let mut csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;
        debug!(?columns, "Resolved header columns");

        let mut records = Vec::new();
        let mut report = LoadReport {
            legacy_encoding,
            ..LoadReport::default()
        };

        for row_result in csv_reader.records() {
            let row = row_result?;
            report.rows_read += 1;

            let line = row.position().map(|p| p.line()).unwrap_or(0);
            match self.parse_row(&row, &columns, line) {
                Ok(record) => records.push(record),
                Err(e @ ProcessingError::MalformedRow { .. })
                    if self.malformed_rows == MalformedRowPolicy::Skip =>
                {
                    warn!("Skipping row: {}", e);
                    report.skipped_rows += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok((Dataset::new(records), report))
    }

    /// Parse a single data row into a record
    fn parse_row(
        &self,
        row: &StringRecord,
        columns: &ColumnIndex,
        line: u64,
    ) -> Result<TemperatureRecord> {
        let field = |index: usize| row.get(index).unwrap_or("");

        let year = parse_date_part::<i32>(field(columns.year), COL_YEAR, line)?;
        let month = parse_date_part::<u32>(field(columns.month), COL_MONTH, line)?;
        let day = parse_date_part::<u32>(field(columns.day), COL_DAY, line)?;

        let date = TemperatureRecord::date_from_parts(year, month, day).ok_or_else(|| {
            ProcessingError::MalformedRow {
                line,
                message: format!("{}-{}-{} is not a valid calendar date", year, month, day),
            }
        })?;

        Ok(TemperatureRecord::new(
            field(columns.station),
            date,
            parse_temperature(field(columns.t_min)),
            parse_temperature(field(columns.t_max)),
        ))
    }
}

impl Default for TemperatureReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode as UTF-8 (BOM stripped), falling back to Windows-1252.
fn decode_input(bytes: &[u8]) -> (Cow<'_, str>, bool) {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return (text, false);
    }
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    (text, true)
}

fn parse_date_part<T: std::str::FromStr>(value: &str, column: &str, line: u64) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| ProcessingError::MalformedRow {
        line,
        message: format!("invalid {} value '{}'", column, value),
    })
}

/// Empty, non-numeric and non-finite fields are "no value".
/// A decimal comma is accepted.
pub(crate) fn parse_temperature(value: &str) -> Option<f32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value
        .replace(',', ".")
        .parse::<f32>()
        .ok()
        .filter(|t| t.is_finite())
}
