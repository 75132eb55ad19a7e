use crate::error::{ProcessingError, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct FetchOutcome {
    pub url: String,
    pub path: PathBuf,
    pub bytes_written: usize,
}

/// Downloads the dataset CSV to local storage.
///
/// The destination is only replaced after a successful (2xx) response has
/// been fully received; on any failure the previous file stays as it was.
pub struct RemoteFetcher {
    client: reqwest::Client,
}

impl RemoteFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch_to_path(&self, url: &str, destination: &Path) -> Result<FetchOutcome> {
        let fetch_error = |message: String| ProcessingError::Fetch {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Remote source returned an error status");
            return Err(fetch_error(format!("HTTP status {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        persist_atomically(destination, &body)?;
        info!(%url, path = %destination.display(), bytes = body.len(), "Fetched dataset");

        Ok(FetchOutcome {
            url: url.to_string(),
            path: destination.to_path_buf(),
            bytes_written: body.len(),
        })
    }
}

/// Write `bytes` to a temp file next to `destination`, then rename it into place.
pub fn persist_atomically(destination: &Path, bytes: &[u8]) -> Result<()> {
    let dir = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(bytes)?;
    temp_file.flush()?;
    temp_file
        .persist(destination)
        .map_err(|e| ProcessingError::Io(e.error))?;

    Ok(())
}
