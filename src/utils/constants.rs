/// Source CSV column names
pub const COL_STATION: &str = "Nombre Estacion";
pub const COL_YEAR: &str = "Año";
pub const COL_MONTH: &str = "Mes";
pub const COL_DAY: &str = "Dia";
pub const COL_T_MIN: &str = "TMinima";
pub const COL_T_MAX: &str = "TMaxima";

/// Export-only column carrying the ISO date
pub const COL_DATE: &str = "Fecha";

/// Dataset location defaults
pub const DEFAULT_DATA_PATH: &str = "data/temperaturasDiariasPorEstaciones2012.csv";
pub const DEFAULT_CONFIG_FILE: &str = "clima-chile.toml";
pub const ENV_PREFIX: &str = "CLIMA";

/// Field separator of the source file and of CSV exports
pub const DEFAULT_DELIMITER: u8 = b';';

/// Extreme-heat day threshold (°C, strictly exceeded)
pub const DEFAULT_EXTREME_THRESHOLD: f32 = 25.0;

/// Processing defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
