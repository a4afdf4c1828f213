use std::io;
use std::path::Path;

use async_trait::async_trait;

#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Convert `input` into a file at `output` with the given sample rate and
    /// channel count, overwriting any existing file at `output`.
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        sample_rate_hz: u32,
        channels: u8,
    ) -> Result<(), TranscodingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscodingError {
    #[error("transcoding tool unavailable: {0}")]
    ToolUnavailable(String),
    #[error("transcoding failed: {0}")]
    Failed(String),
    #[error("io: {0}")]
    Io(#[from] io::Error),
}
