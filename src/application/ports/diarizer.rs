use std::io;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::SpeakerTurn;

#[async_trait]
pub trait Diarizer: Send + Sync {
    /// Partition the normalized audio file into speaker turns, ordered by
    /// non-decreasing start time. Speaker labels are stable only within one
    /// call.
    async fn diarize(&self, audio_path: &Path) -> Result<Vec<SpeakerTurn>, DiarizationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DiarizationError {
    #[error("audio read failed: {0}")]
    Io(#[from] io::Error),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
