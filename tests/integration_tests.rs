use chrono::NaiveDate;
use clima_chile::analyzers::{summarize, DatasetAnalyzer};
use clima_chile::models::{DateRange, FilterCriteria, TemperatureColumn};
use clima_chile::processors::{
    default_range, filter_by_date_range, filter_by_station, monthly_averages, select_extreme_days,
    ExplorationPipeline,
};
use clima_chile::readers::{MalformedRowPolicy, TemperatureReader};
use clima_chile::writers::{CsvExporter, ParquetWriter};
use clima_chile::ProcessingError;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const FIXTURE: &str = "\
CodigoNacional;Nombre Estacion;Año;Mes;Dia;TMinima;TMaxima
330020;Quinta Normal, Santiago;2012;1;1;10;28
330020;Quinta Normal, Santiago;2012;1;2;12;22
330020;Quinta Normal, Santiago;2012;1;3;13.4;25
330020;Quinta Normal, Santiago;2012;2;1;14;18
330020;Quinta Normal, Santiago;2012;2;2;;
330020;Quinta Normal, Santiago;2012;3;15;9.5;26.2
390006;Valdivia;2012;6;1;2.1;9.8
390006;Valdivia;2012;6;2;-1.5;8.0
520006;Concepción;2012;1;10;11;21.5
";

const SANTIAGO: &str = "Quinta Normal, Santiago";

fn fixture_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(FIXTURE.as_bytes()).expect("Failed to write fixture");
    file
}

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2012, m, d).unwrap()
}

#[test]
fn test_load_and_list_stations() {
    let file = fixture_file();
    let dataset = TemperatureReader::new().read_dataset(file.path()).unwrap();

    assert_eq!(dataset.len(), 9);
    assert_eq!(dataset.stations(), vec![SANTIAGO, "Valdivia", "Concepción"]);

    let overview = DatasetAnalyzer::new().analyze(&dataset);
    assert_eq!(overview.stations[0].records, 6);
    assert_eq!(overview.missing_t_max, 1);
}

#[test]
fn test_station_then_range_filter() {
    let file = fixture_file();
    let dataset = TemperatureReader::new().read_dataset(file.path()).unwrap();

    let station_records = filter_by_station(dataset.records(), SANTIAGO);
    assert!(station_records.iter().all(|r| r.station == SANTIAGO));

    let default = default_range(&station_records).unwrap();
    assert_eq!((default.from(), default.to()), (date(1, 1), date(3, 15)));

    let criteria = FilterCriteria::new(SANTIAGO, date(1, 2), date(2, 1)).unwrap();
    let filtered = filter_by_date_range(&station_records, &criteria.range().unwrap());
    let dates: Vec<NaiveDate> = filtered.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![date(1, 2), date(1, 3), date(2, 1)]);
}

#[test]
fn test_statistics_skip_missing_values() {
    let file = fixture_file();
    let dataset = TemperatureReader::new().read_dataset(file.path()).unwrap();
    let records = filter_by_station(dataset.records(), SANTIAGO);

    let summary = summarize(&records);
    assert_eq!(summary.t_min.count, Some(5));
    assert_eq!(summary.t_max.count, Some(5));
    assert_eq!(summary.t_max.min, Some(18.0));
    assert_eq!(summary.t_max.max, Some(28.0));
    assert_eq!(summary.t_max.p50, Some(25.0));

    let single = filter_by_station(dataset.records(), "Concepción");
    assert_eq!(summarize(&single).t_max.std, None);
}

#[test]
fn test_monthly_and_extreme_examples() {
    let file = fixture_file();
    let dataset = TemperatureReader::new().read_dataset(file.path()).unwrap();
    let records = filter_by_station(dataset.records(), SANTIAGO);

    let months: Vec<u32> = monthly_averages(&records).iter().map(|m| m.month).collect();
    assert_eq!(months, vec![1, 2, 3]);

    let february = &monthly_averages(&records)[1];
    assert_eq!(february.avg_t_max, Some(18.0));
    assert_eq!(february.t_max_count, 1);

    let hot = select_extreme_days(&records, 25.0, TemperatureColumn::Max);
    let hot_dates: Vec<NaiveDate> = hot.iter().map(|r| r.date).collect();
    assert_eq!(hot_dates, vec![date(1, 1), date(3, 15)]);
}

#[test]
fn test_pipeline_rejects_inverted_range() {
    let file = fixture_file();
    let dataset = TemperatureReader::new().read_dataset(file.path()).unwrap();

    let result = ExplorationPipeline::new().run(&dataset, SANTIAGO, Some(date(3, 1)), Some(date(1, 1)));
    assert!(matches!(result, Err(ProcessingError::InvalidRange { .. })));

    let empty = ExplorationPipeline::new()
        .run(&dataset, "Valdivia", Some(date(1, 1)), Some(date(1, 31)))
        .unwrap();
    assert!(empty.is_empty());
    assert!(empty.statistics.t_min.is_empty());
}

#[test]
fn test_csv_export_round_trip_through_files() {
    let file = fixture_file();
    let dataset = TemperatureReader::new().read_dataset(file.path()).unwrap();
    let filtered = ExplorationPipeline::new()
        .filtered_set(&dataset, SANTIAGO, None, None)
        .unwrap();

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("santiago.csv");
    CsvExporter::new().write_to_path(&filtered.records, &output_path).unwrap();

    let reloaded = TemperatureReader::new().read_dataset(&output_path).unwrap();
    assert_eq!(reloaded.records(), filtered.records.as_slice());
}

#[test]
fn test_parquet_export() {
    let file = fixture_file();
    let dataset = TemperatureReader::new().read_dataset(file.path()).unwrap();
    let range = DateRange::new(date(6, 1), date(6, 30)).unwrap();
    let records = filter_by_date_range(&filter_by_station(dataset.records(), "Valdivia"), &range);

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("valdivia.parquet");
    let writer = ParquetWriter::new();
    writer.write_records(&records, &output_path).unwrap();

    assert!(output_path.exists());
    assert_eq!(writer.read_records(&output_path).unwrap(), records);
}

#[test]
fn test_malformed_policy_on_file() {
    let mut file = fixture_file();
    writeln!(file, "390006;Valdivia;2012;2;31;1;2").unwrap();

    let rejected = TemperatureReader::new().read_dataset(file.path());
    assert!(matches!(rejected, Err(ProcessingError::MalformedRow { line: 11, .. })));

    let (dataset, report) = TemperatureReader::new()
        .with_malformed_row_policy(MalformedRowPolicy::Skip)
        .read_dataset_with_report(file.path())
        .unwrap();
    assert_eq!(dataset.len(), 9);
    assert_eq!(report.skipped_rows, 1);
}
