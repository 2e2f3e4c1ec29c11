//! JSON file implementation of the mapping repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::domain::entities::Mapping;
use crate::domain::repositories::{MappingRepository, Stream};
use crate::error::AppError;

/// Reasons a stream could not be loaded. Never surfaced to callers; logged only.
#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("stream file does not exist")]
    Missing,

    #[error("failed to read stream file: {0}")]
    Io(#[from] std::io::Error),

    #[error("stream file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Repository storing each stream as a JSON object in a data directory.
///
/// Files are named `forward.json` and `reverse.json` and hold a flat
/// `{"<key>": "<value>", ...}` object with sorted keys. Each save writes a
/// temporary file, syncs it and renames it over the old one, so a stream is
/// either fully old or fully new after a crash.
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    /// Creates a repository rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `stream`.
    pub fn stream_path(&self, stream: Stream) -> PathBuf {
        self.dir.join(format!("{}.json", stream.name()))
    }

    fn temp_path(&self, stream: Stream) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", stream.name()))
    }

    async fn try_load(&self, stream: Stream) -> Result<Mapping, LoadError> {
        let bytes = match tokio::fs::read(self.stream_path(stream)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(LoadError::Missing),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Writes `json` to the temp file and renames it over the stream file.
    async fn replace(&self, stream: Stream, json: &[u8]) -> std::io::Result<()> {
        let tmp_path = self.temp_path(stream);

        let mut file = tokio::fs::File::create(&tmp_path).await?;
        file.write_all(json).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp_path, self.stream_path(stream)).await
    }
}

#[async_trait]
impl MappingRepository for JsonFileRepository {
    async fn load(&self, stream: Stream) -> Mapping {
        match self.try_load(stream).await {
            Ok(mapping) => {
                debug!(%stream, entries = mapping.len(), "Loaded mapping stream");
                mapping
            }
            Err(LoadError::Missing) => {
                debug!(%stream, "No stored mapping, starting empty");
                Mapping::new()
            }
            Err(e) => {
                warn!(%stream, error = %e, "Failed to load mapping, starting empty");
                Mapping::new()
            }
        }
    }

    async fn save(&self, stream: Stream, mapping: &Mapping) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let sorted: BTreeMap<&String, &String> = mapping.iter().collect();
        let json = serde_json::to_vec_pretty(&sorted)?;

        if let Err(e) = self.replace(stream, &json).await {
            if let Err(cleanup) = tokio::fs::remove_file(self.temp_path(stream)).await
                && cleanup.kind() != ErrorKind::NotFound
            {
                warn!(%stream, error = %cleanup, "Failed to remove temporary stream file");
            }
            return Err(e.into());
        }

        debug!(%stream, entries = mapping.len(), "Saved mapping stream");
        Ok(())
    }
}
