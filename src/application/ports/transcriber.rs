use std::path::Path;

use async_trait::async_trait;

use crate::domain::TranscriptSegment;

#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file into timed segments, ordered by
    /// non-decreasing start time.
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio read failed: {0}")]
    AudioRead(String),
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
