use crate::utils::constants::{COMPRESSION_SNAPPY, DEFAULT_SAMPLE_SIZE};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clima-chile")]
#[command(about = "Daily temperature explorer for Chilean weather stations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file [default: clima-chile.toml]")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Skip rows whose Año/Mes/Dia are not a valid date instead of failing"
    )]
    pub skip_malformed: bool,

    #[arg(
        long,
        global = true,
        help = "Download the dataset from the configured source before loading it"
    )]
    pub refresh: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the dataset CSV from the remote source
    Fetch {
        #[arg(short, long, help = "Source URL [default: source_url setting]")]
        url: Option<String>,

        #[arg(short, long, help = "Destination path [default: data_path setting]")]
        output: Option<PathBuf>,
    },

    /// List the stations present in the dataset
    Stations {
        #[arg(short, long, help = "Input CSV file [default: data_path setting]")]
        input: Option<PathBuf>,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    /// Display an overview of the dataset and its first records
    Info {
        #[arg(short, long, help = "Input CSV file [default: data_path setting]")]
        input: Option<PathBuf>,

        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_SIZE)]
        sample: usize,

        #[arg(long, help = "Print JSON instead of text")]
        json: bool,
    },

    /// Statistics, monthly averages and extreme days for one station
    Explore {
        #[arg(short, long, help = "Input CSV file [default: data_path setting]")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Station name (exact, case-sensitive)")]
        station: String,

        #[arg(long, help = "First date (YYYY-MM-DD) [default: station's first date]")]
        from: Option<NaiveDate>,

        #[arg(long, help = "Last date, inclusive [default: station's last date]")]
        to: Option<NaiveDate>,

        #[arg(short, long, help = "Extreme-day threshold in °C [default: extreme_threshold setting]")]
        threshold: Option<f32>,

        #[arg(long, default_value = "max", help = "Column tested against the threshold (min|max)")]
        column: String,

        #[arg(long, help = "Print JSON instead of text")]
        json: bool,
    },

    /// Write the filtered records of one station to CSV or Parquet
    Export {
        #[arg(short, long, help = "Input CSV file [default: data_path setting]")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Station name (exact, case-sensitive)")]
        station: String,

        #[arg(long, help = "First date (YYYY-MM-DD) [default: station's first date]")]
        from: Option<NaiveDate>,

        #[arg(long, help = "Last date, inclusive [default: station's last date]")]
        to: Option<NaiveDate>,

        #[arg(
            short,
            long,
            help = "Output file [default: output/{station}-{from}-{to}.{format}]"
        )]
        output: Option<PathBuf>,

        #[arg(short, long, default_value = "csv", help = "csv or parquet")]
        format: String,

        #[arg(short, long, default_value = COMPRESSION_SNAPPY, help = "Parquet compression")]
        compression: String,
    },
}
