use crate::error::{ProcessingError, Result};
use crate::readers::MalformedRowPolicy;
use crate::utils::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_DATA_PATH, DEFAULT_EXTREME_THRESHOLD, DEFAULT_FETCH_TIMEOUT_SECS,
    ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Runtime settings: built-in defaults, then `clima-chile.toml` (or the file
/// given with `--config`), then `CLIMA_*` environment variables.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    pub data_path: PathBuf,

    pub source_url: Option<String>,

    #[validate(length(equal = 1))]
    pub delimiter: String,

    #[validate(range(min = -50.0, max = 60.0))]
    pub extreme_threshold: f32,

    pub malformed_rows: MalformedRowPolicy,

    #[validate(range(min = 1))]
    pub fetch_timeout_secs: u64,
}

impl Settings {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Same layering as [`Settings::load`], with the environment layer supplied.
    fn load_with_env(config_file: Option<&Path>, environment: Environment) -> Result<Self> {
        let builder = Config::builder()
            .set_default("data_path", DEFAULT_DATA_PATH)?
            .set_default("delimiter", ";")?
            .set_default("extreme_threshold", DEFAULT_EXTREME_THRESHOLD as f64)?
            .set_default("malformed_rows", "reject")?
            .set_default("fetch_timeout_secs", DEFAULT_FETCH_TIMEOUT_SECS as i64)?;

        let builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings: Settings = builder
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        settings.delimiter_byte()?;
        Ok(settings)
    }

    /// The delimiter as the single ASCII byte the CSV reader/writer expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(ProcessingError::Config(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::TempDir;

    // Fixed variables instead of the process environment
    fn load(config_file: &Path, vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::load_with_env(
            Some(config_file),
            Environment::with_prefix(ENV_PREFIX).source(Some(vars)),
        )
    }

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("settings.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_file_overrides_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_config(
            &dir,
            "data_path = \"datos/temps.csv\"\nextreme_threshold = 30.0\nmalformed_rows = \"skip\"\n",
        );

        let settings = load(&path, &[])?;

        assert_eq!(settings.data_path, PathBuf::from("datos/temps.csv"));
        assert_eq!(settings.extreme_threshold, 30.0);
        assert_eq!(settings.malformed_rows, MalformedRowPolicy::Skip);
        assert_eq!(settings.delimiter_byte()?, b';');
        assert_eq!(settings.fetch_timeout_secs, DEFAULT_FETCH_TIMEOUT_SECS);
        Ok(())
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "extreme_threshold = 99.0\n");

        assert!(matches!(load(&path, &[]), Err(ProcessingError::Validation(_))));
    }

    #[test]
    fn test_multi_character_delimiter_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "delimiter = \"ñ\"\n");

        assert!(load(&path, &[]).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(load(&path, &[]), Err(ProcessingError::Settings(_))));
    }

    #[test]
    fn test_environment_overrides_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_config(&dir, "extreme_threshold = 30.0\n");

        let settings = load(
            &path,
            &[
                ("CLIMA_EXTREME_THRESHOLD", "32.5"),
                ("CLIMA_SOURCE_URL", "http://localhost/temps.csv"),
            ],
        )?;

        assert_eq!(settings.extreme_threshold, 32.5);
        assert_eq!(settings.source_url.as_deref(), Some("http://localhost/temps.csv"));
        Ok(())
    }
}
