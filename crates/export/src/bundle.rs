use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::AsyncReadExt;

use sandalia_core::{DomainError, DomainResult};
use sandalia_store::SnapshotSource;

/// File name of the bundle inside the export directory. Writing a new
/// bundle replaces the previous one.
pub const BUNDLE_FILE: &str = "bundle.json";

const CHECKSUM_CHUNK: usize = 4096;

/// Outcome of writing a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleInfo {
    pub file_name: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

/// Checksum of the bundle currently on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecksumInfo {
    pub file_name: String,
    pub sha256: String,
}

/// Writes dataset bundles into the export directory and verifies them.
#[derive(Debug, Clone)]
pub struct ExportService<S> {
    source: S,
    export_dir: PathBuf,
}

impl<S: SnapshotSource> ExportService<S> {
    pub fn new(source: S, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            export_dir: export_dir.into(),
        }
    }

    /// Serialize the current dataset to `bundle.json`, replacing any
    /// previous bundle.
    pub async fn write_bundle(&self) -> DomainResult<BundleInfo> {
        let snapshot = self.source.snapshot()?;
        let body = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| DomainError::operational(format!("bundle encoding failed: {e}")))?;

        fs::create_dir_all(&self.export_dir).await.map_err(io_err)?;
        let path = self.bundle_path();
        fs::write(&path, &body).await.map_err(io_err)?;
        tracing::info!("wrote bundle to {}", path.display());

        Ok(BundleInfo {
            file_name: BUNDLE_FILE.to_string(),
            size_bytes: body.len() as u64,
            created_at: snapshot.taken_at,
        })
    }

    /// SHA-256 of the bundle on disk. Not-found when no bundle has been
    /// written yet.
    pub async fn checksum(&self) -> DomainResult<ChecksumInfo> {
        let path = self.bundle_path();
        if !fs::try_exists(&path).await.map_err(io_err)? {
            return Err(DomainError::not_found("bundle not found; write one first"));
        }
        Ok(ChecksumInfo {
            file_name: BUNDLE_FILE.to_string(),
            sha256: compute_checksum(&path).await?,
        })
    }

    fn bundle_path(&self) -> PathBuf {
        self.export_dir.join(BUNDLE_FILE)
    }
}

/// SHA-256 of a file, digested in fixed-size chunks.
pub async fn compute_checksum(path: &Path) -> DomainResult<String> {
    let mut file = fs::File::open(path).await.map_err(io_err)?;
    let mut hasher = Sha256::new();
    let mut chunk = vec![0u8; CHECKSUM_CHUNK];
    loop {
        let read = file.read(&mut chunk).await.map_err(io_err)?;
        if read == 0 {
            break;
        }
        hasher.update(&chunk[..read]);
    }
    let digest = hasher.finalize();
    Ok(format!("{digest:x}"))
}

fn io_err(err: std::io::Error) -> DomainError {
    DomainError::operational(format!("export io failure: {err}"))
}
