use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

use osteria_core::record::VisitorRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The on-disk visitor collection: one JSON array of records.
///
/// Reads fail open (missing or corrupt file == empty collection). Writes go
/// to a uniquely named sibling temp file first and are renamed over the
/// canonical path, so a crash mid-write leaves the previous document intact
/// and concurrent readers never see a truncated file.
pub struct VisitorStore {
    path: PathBuf,
}

impl VisitorStore {
    /// Open the store at `path`, creating parent directories.
    ///
    /// If `path` does not exist yet and `legacy_path` does, the legacy
    /// document is copied forward verbatim (the legacy file itself is left
    /// untouched). This runs once; after the copy the canonical path exists
    /// and the legacy file is never consulted again.
    pub async fn open(path: &Path, legacy_path: Option<&Path>) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let primary_exists = fs::try_exists(path).await.unwrap_or(false);
        if !primary_exists {
            if let Some(legacy) = legacy_path {
                if fs::try_exists(legacy).await.unwrap_or(false) {
                    let bytes = fs::read(legacy).await.map_err(|source| StoreError::Io {
                        path: legacy.to_path_buf(),
                        source,
                    })?;
                    write_atomic(path, &bytes).await?;
                    debug!(
                        legacy = %legacy.display(),
                        store = %path.display(),
                        "Copied legacy visitor store forward"
                    );
                }
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Load the full record collection.
    ///
    /// A missing file is the normal first-run state; a corrupt or non-array
    /// document is logged and treated as empty. Visit tracking must never
    /// fail a page request over an unreadable store.
    pub async fn load(&self) -> Vec<VisitorRecord> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(store = %self.path.display(), error = %e, "Visitor store unreadable; treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_slice::<Vec<VisitorRecord>>(&bytes) {
            Ok(records) => records,
            Err(e) => {
                warn!(store = %self.path.display(), error = %e, "Visitor store corrupt; treating as empty");
                Vec::new()
            }
        }
    }

    /// Persist the full record collection atomically.
    pub async fn persist(&self, records: &[VisitorRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records)?;
        write_atomic(&self.path, &json).await
    }
}

/// Write `bytes` to a uniquely named temp file next to `path`, then rename
/// it over `path`. The temp file is removed on a failed rename.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let temp_path = path.with_extension(format!("{}.tmp", uuid::Uuid::new_v4().simple()));
    fs::write(&temp_path, bytes)
        .await
        .map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
    if let Err(source) = fs::rename(&temp_path, path).await {
        fs::remove_file(&temp_path).await.ok();
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}
