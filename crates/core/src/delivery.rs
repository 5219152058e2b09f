//! Delivery of downloaded binaries to the user.
//!
//! The analysis container hands finished report bytes to a [`DownloadSink`];
//! how they reach the user (a browser download, a file on disk) belongs to
//! the host platform.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::errors::{Error, Result};

/// Platform capability that hands a binary payload to the user.
///
/// Implementations release every temporary resource they acquire, whether
/// delivery succeeds or fails.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Deliver `bytes` under `filename`, returning where the file ended up.
    async fn deliver(&self, bytes: Vec<u8>, filename: &str) -> Result<PathBuf>;
}

/// Writes downloads into a directory on the local filesystem.
///
/// Bytes are staged in a temporary file inside the target directory and
/// persisted under the final name only once fully written. The staging file
/// is removed when anything fails.
#[derive(Debug, Clone)]
pub struct FileDownloadSink {
    directory: PathBuf,
}

impl FileDownloadSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

fn write_atomically(directory: &Path, bytes: &[u8], filename: &str) -> Result<PathBuf> {
    let name = Path::new(filename);
    if filename.is_empty() || name.file_name() != Some(name.as_os_str()) {
        return Err(Error::delivery(format!("Invalid download filename '{}'", filename)));
    }

    std::fs::create_dir_all(directory)?;
    let mut staging = NamedTempFile::new_in(directory)?;
    staging.write_all(bytes)?;
    staging.as_file().sync_all()?;

    let target = directory.join(name);
    staging
        .persist(&target)
        .map_err(|e| Error::delivery(format!("Failed to save {}: {}", target.display(), e.error)))?;
    Ok(target)
}

#[async_trait]
impl DownloadSink for FileDownloadSink {
    async fn deliver(&self, bytes: Vec<u8>, filename: &str) -> Result<PathBuf> {
        let directory = self.directory.clone();
        let filename = filename.to_string();
        debug!("Delivering {} bytes as {}", bytes.len(), filename);

        let target = tokio::task::spawn_blocking(move || write_atomically(&directory, &bytes, &filename))
            .await
            .map_err(|e| Error::delivery(format!("Delivery task failed: {}", e)))??;

        info!("Saved download to {}", target.display());
        Ok(target)
    }
}
