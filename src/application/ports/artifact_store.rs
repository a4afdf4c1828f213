use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

/// Persistence for one request's artifact files.
///
/// Artifacts are addressed by their bare file name; `resolve` exposes the
/// absolute path so external tools (ffmpeg, the models) can read and write
/// the same files.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), ArtifactStoreError>;

    async fn fetch(&self, name: &str) -> Result<Vec<u8>, ArtifactStoreError>;

    fn resolve(&self, name: &str) -> PathBuf;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("not found: {0}")]
    NotFound(String),
}
