use chrono::NaiveDate;
use clima_chile::analyzers::summarize;
use clima_chile::models::{Dataset, TemperatureRecord};
use clima_chile::processors::{monthly_averages, ExplorationPipeline};
use clima_chile::readers::TemperatureReader;
use clima_chile::writers::CsvExporter;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// One year of daily readings per station, with every tenth reading missing
fn create_test_dataset(station_count: usize, days: usize) -> Dataset {
    let base_date = NaiveDate::from_ymd_opt(2012, 1, 1).unwrap();
    let mut records = Vec::with_capacity(station_count * days);

    for station in 0..station_count {
        for day in 0..days {
            let date = base_date + chrono::Duration::days(day as i64);
            let base_temp = 12.0 + (day as f32 * 0.0172).sin() * 8.0 + station as f32 * 0.3;
            let t_max = if day % 10 == 0 { None } else { Some(base_temp + 7.5) };

            records.push(TemperatureRecord::new(
                format!("Estación {}", station),
                date,
                Some(base_temp - 6.0),
                t_max,
            ));
        }
    }

    Dataset::new(records)
}

fn benchmark_pipeline(c: &mut Criterion) {
    let dataset = create_test_dataset(30, 366);
    let pipeline = ExplorationPipeline::new();

    c.bench_function("exploration_pipeline", |b| {
        b.iter(|| {
            let report = pipeline
                .run(black_box(&dataset), "Estación 7", None, None)
                .unwrap();
            black_box(report);
        })
    });
}

fn benchmark_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for days in [31, 366, 3660].iter() {
        let dataset = create_test_dataset(1, *days);
        group.bench_with_input(BenchmarkId::new("summarize", days), days, |b, _| {
            b.iter(|| black_box(summarize(black_box(dataset.records()))))
        });
        group.bench_with_input(BenchmarkId::new("monthly_averages", days), days, |b, _| {
            b.iter(|| black_box(monthly_averages(black_box(dataset.records()))))
        });
    }

    group.finish();
}

fn benchmark_csv_round_trip(c: &mut Criterion) {
    let dataset = create_test_dataset(10, 366);
    let bytes = CsvExporter::new().to_bytes(dataset.records()).unwrap();

    c.bench_function("csv_export", |b| {
        b.iter(|| black_box(CsvExporter::new().to_bytes(black_box(dataset.records())).unwrap()))
    });

    c.bench_function("csv_load", |b| {
        b.iter(|| black_box(TemperatureReader::new().read_from_bytes(black_box(&bytes)).unwrap()))
    });
}

criterion_group!(
    benches,
    benchmark_pipeline,
    benchmark_statistics,
    benchmark_csv_round_trip
);
criterion_main!(benches);
