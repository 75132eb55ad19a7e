use crate::analyzers::DatasetAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::models::{Dataset, TemperatureColumn};
use crate::processors::ExplorationPipeline;
use crate::readers::{MalformedRowPolicy, RemoteFetcher, TemperatureReader};
use crate::settings::Settings;
use crate::utils::{generate_default_export_filename, init_logging, ProgressReporter};
use crate::writers::{CsvExporter, ParquetWriter};
use std::path::{Path, PathBuf};
use tracing::warn;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = Settings::load(cli.config.as_deref())?;
    let malformed_rows = if cli.skip_malformed {
        MalformedRowPolicy::Skip
    } else {
        settings.malformed_rows
    };

    let context = CommandContext {
        settings,
        malformed_rows,
        refresh: cli.refresh,
    };

    match cli.command {
        Commands::Fetch { url, output } => {
            let destination = output.unwrap_or_else(|| context.settings.data_path.clone());
            let url = context.source_url(url)?;
            fetch_dataset(&context.settings, &url, &destination, false).await?;
        }

        Commands::Stations { input, json } => {
            let dataset = context.load(input, json).await?;
            let overview = DatasetAnalyzer::new().analyze(&dataset);

            if json {
                println!("{}", serde_json::to_string_pretty(&overview.stations)?);
            } else {
                print!("{}", overview.station_table());
            }
        }

        Commands::Info {
            input,
            sample,
            json,
        } => {
            let dataset = context.load(input, json).await?;
            let overview = DatasetAnalyzer::new().analyze(&dataset);

            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
                return Ok(());
            }

            println!("{}", overview.summary());

            if sample > 0 {
                println!("\nSample Records (showing {} records):", sample);
                for (i, record) in dataset.head(sample).iter().enumerate() {
                    println!(
                        "{}. {} on {}: min={}, max={}",
                        i + 1,
                        record.station,
                        record.date,
                        record.t_min.map_or("-".to_string(), |t| format!("{:.1}°C", t)),
                        record.t_max.map_or("-".to_string(), |t| format!("{:.1}°C", t)),
                    );
                }
            }
        }

        Commands::Explore {
            input,
            station,
            from,
            to,
            threshold,
            column,
            json,
        } => {
            let column = TemperatureColumn::parse(&column).ok_or_else(|| {
                ProcessingError::Config(format!("Unknown temperature column: {}", column))
            })?;
            let threshold = threshold.unwrap_or(context.settings.extreme_threshold);

            let dataset = context.load(input, json).await?;
            let report = ExplorationPipeline::new()
                .with_extreme_threshold(threshold)
                .with_extreme_column(column)
                .run(&dataset, &station, from, to)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.summary());
            }
        }

        Commands::Export {
            input,
            station,
            from,
            to,
            output,
            format,
            compression,
        } => {
            let format = format.to_lowercase();
            if format != "csv" && format != "parquet" {
                return Err(ProcessingError::Config(format!(
                    "Unsupported export format: {}",
                    format
                )));
            }

            let dataset = context.load(input, false).await?;
            let filtered = ExplorationPipeline::new().filtered_set(&dataset, &station, from, to)?;

            if filtered.records.is_empty() {
                println!("No records for station '{}' in the selected range", station);
            }

            let output_file = output.unwrap_or_else(|| {
                generate_default_export_filename(&station, filtered.date_range.as_ref(), &format)
            });
            if let Some(parent) = output_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            if format == "parquet" {
                let writer = ParquetWriter::new().with_compression(&compression)?;
                writer.write_records(&filtered.records, &output_file)?;
                println!("{}", writer.get_file_info(&output_file)?.summary());
            } else {
                CsvExporter::new()
                    .with_delimiter(context.settings.delimiter_byte()?)
                    .write_to_path(&filtered.records, &output_file)?;
            }

            println!(
                "Exported {} records to {}",
                filtered.records.len(),
                output_file.display()
            );
        }
    }

    Ok(())
}

struct CommandContext {
    settings: Settings,
    malformed_rows: MalformedRowPolicy,
    refresh: bool,
}

impl CommandContext {
    fn source_url(&self, url: Option<String>) -> Result<String> {
        url.or_else(|| self.settings.source_url.clone()).ok_or_else(|| {
            ProcessingError::Config(
                "No source URL: pass --url or set source_url / CLIMA_SOURCE_URL".to_string(),
            )
        })
    }

    /// Load the dataset, refreshing it from the remote source first when asked.
    async fn load(&self, input: Option<PathBuf>, quiet: bool) -> Result<Dataset> {
        let path = input.unwrap_or_else(|| self.settings.data_path.clone());

        if self.refresh {
            let url = self.source_url(None)?;
            fetch_dataset(&self.settings, &url, &path, quiet).await?;
        }

        let progress = ProgressReporter::new_spinner("Loading dataset...", quiet);
        let reader = TemperatureReader::new()
            .with_delimiter(self.settings.delimiter_byte()?)
            .with_malformed_row_policy(self.malformed_rows);
        let (dataset, report) = reader.read_dataset_with_report(&path)?;
        progress.finish_and_clear();

        if report.skipped_rows > 0 && !quiet {
            println!(
                "Skipped {} of {} rows with invalid dates",
                report.skipped_rows, report.rows_read
            );
        }

        Ok(dataset)
    }
}

/// Download `url` into `destination`.
///
/// When the download fails but a previous copy exists, the failure is only
/// a warning and the existing file is used.
async fn fetch_dataset(settings: &Settings, url: &str, destination: &Path, quiet: bool) -> Result<()> {
    let progress = ProgressReporter::new_spinner(&format!("Downloading {}...", url), quiet);
    let fetcher = RemoteFetcher::new(settings.fetch_timeout_secs)?;

    match fetcher.fetch_to_path(url, destination).await {
        Ok(outcome) => {
            progress.finish_with_message(&format!(
                "Downloaded {} bytes to {}",
                outcome.bytes_written,
                outcome.path.display()
            ));
            Ok(())
        }
        Err(e) if destination.exists() => {
            progress.finish_and_clear();
            warn!("{}; keeping existing {}", e, destination.display());
            if !quiet {
                println!("⚠️  {} (using existing {})", e, destination.display());
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}
