use crate::error::Result;
use crate::models::TemperatureRecord;
use crate::utils::constants::{
    COL_DATE, COL_DAY, COL_MONTH, COL_STATION, COL_T_MAX, COL_T_MIN, COL_YEAR, DEFAULT_DELIMITER,
};
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Column order of exported files.
pub const EXPORT_COLUMNS: [&str; 7] = [
    COL_STATION,
    COL_DATE,
    COL_YEAR,
    COL_MONTH,
    COL_DAY,
    COL_T_MIN,
    COL_T_MAX,
];

/// Writes a filtered slice back to CSV.
///
/// The layout re-loads through `TemperatureReader` configured with the same
/// delimiter: missing readings are empty fields and floats use their shortest
/// round-tripping representation.
pub struct CsvExporter {
    delimiter: u8,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn write_records<W: Write>(&self, records: &[TemperatureRecord], writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        csv_writer.write_record(EXPORT_COLUMNS)?;

        for record in records {
            csv_writer.write_record([
                record.station.clone(),
                record.date.format("%Y-%m-%d").to_string(),
                record.year().to_string(),
                record.month().to_string(),
                record.day().to_string(),
                format_temperature(record.t_min),
                format_temperature(record.t_max),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_to_path(&self, records: &[TemperatureRecord], path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_records(records, BufWriter::new(file))?;

        info!(path = %path.display(), records = records.len(), "Exported CSV");
        Ok(())
    }

    pub fn to_bytes(&self, records: &[TemperatureRecord]) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_records(records, &mut buffer)?;
        Ok(buffer)
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_temperature(value: Option<f32>) -> String {
    value.map(|t| t.to_string()).unwrap_or_default()
}
