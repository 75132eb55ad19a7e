use crate::error::{ProcessingError, Result};
use crate::models::TemperatureRecord;
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE,
};
use arrow::array::{Array, ArrayRef, Date32Array, Float32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write records to a Parquet file. An empty slice still produces a
    /// valid file with the schema and zero rows.
    pub fn write_records(&self, records: &[TemperatureRecord], path: &Path) -> Result<()> {
        let schema = create_schema();
        let batch = records_to_batch(records, schema.clone())?;

        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        info!(path = %path.display(), records = records.len(), "Exported Parquet");
        Ok(())
    }

    /// Read every record back from a file written by [`ParquetWriter::write_records`]
    pub fn read_records(&self, path: &Path) -> Result<Vec<TemperatureRecord>> {
        let file = File::open(path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

        let mut records = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;
            records.extend(batch_to_records(&batch)?);
        }

        Ok(records)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        Ok(ParquetFileInfo {
            total_rows: metadata.file_metadata().num_rows(),
            row_groups: metadata.num_row_groups(),
            file_size: std::fs::metadata(path)?.len(),
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: usize,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Rows: {}\nRow groups: {}\nFile size: {:.1} KB\nCompression: {:?}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1024.0,
            self.compression
        )
    }
}

fn create_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("station_name", DataType::Utf8, false),
        Field::new("date", DataType::Date32, false),
        Field::new("t_min", DataType::Float32, true),
        Field::new("t_max", DataType::Float32, true),
    ]))
}

/// Date32 counts days since 1970-01-01 (`NaiveDate::default()`).
fn date_to_days(date: NaiveDate) -> i32 {
    date.signed_duration_since(NaiveDate::default()).num_days() as i32
}

fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::default().checked_add_signed(Duration::days(days as i64))
}

fn records_to_batch(records: &[TemperatureRecord], schema: Arc<Schema>) -> Result<RecordBatch> {
    let station_names: Vec<&str> = records.iter().map(|r| r.station.as_str()).collect();
    let dates: Vec<i32> = records.iter().map(|r| date_to_days(r.date)).collect();
    let t_mins: Vec<Option<f32>> = records.iter().map(|r| r.t_min).collect();
    let t_maxs: Vec<Option<f32>> = records.iter().map(|r| r.t_max).collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(station_names)),
        Arc::new(Date32Array::from(dates)),
        Arc::new(Float32Array::from(t_mins)),
        Arc::new(Float32Array::from(t_maxs)),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

fn batch_to_records(batch: &RecordBatch) -> Result<Vec<TemperatureRecord>> {
    fn column<'a, T: 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
        batch
            .column_by_name(name)
            .and_then(|c| c.as_any().downcast_ref::<T>())
            .ok_or_else(|| ProcessingError::InvalidFormat(format!("Invalid {} column type", name)))
    }

    let station_names = column::<StringArray>(batch, "station_name")?;
    let dates = column::<Date32Array>(batch, "date")?;
    let t_mins = column::<Float32Array>(batch, "t_min")?;
    let t_maxs = column::<Float32Array>(batch, "t_max")?;

    let optional = |array: &Float32Array, i: usize| (!array.is_null(i)).then(|| array.value(i));

    (0..batch.num_rows())
        .map(|i| {
            let date = days_to_date(dates.value(i)).ok_or_else(|| {
                ProcessingError::InvalidFormat("Invalid date in Parquet file".to_string())
            })?;

            Ok(TemperatureRecord::new(
                station_names.value(i),
                date,
                optional(t_mins, i),
                optional(t_maxs, i),
            ))
        })
        .collect()
}
