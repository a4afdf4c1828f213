use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{
    ArtifactStore, ArtifactStoreError, DiarizationError, Diarizer, Transcoder, TranscodingError,
    Transcriber, TranscriptionError,
};
use crate::application::services::aligner::align;
use crate::application::services::transcript_render::{
    render_plain_transcript, render_speaker_transcript,
};
use crate::domain::ArtifactBase;

const TARGET_SAMPLE_RATE_HZ: u32 = 16_000;
const TARGET_CHANNELS: u8 = 1;

/// Runs one upload through the full pipeline: persist the upload, transcribe
/// it, normalize the audio, diarize, align, and persist both transcript
/// artifacts. Fails as a whole on the first error; artifacts written before
/// the failure point are left in place.
pub struct TranscriptionService<T, D>
where
    T: Transcriber + ?Sized,
    D: Diarizer + ?Sized,
{
    transcriber: Arc<T>,
    diarizer: Arc<D>,
    transcoder: Arc<dyn Transcoder>,
    artifact_store: Arc<dyn ArtifactStore>,
    language: String,
}

impl<T, D> TranscriptionService<T, D>
where
    T: Transcriber + ?Sized,
    D: Diarizer + ?Sized,
{
    pub fn new(
        transcriber: Arc<T>,
        diarizer: Arc<D>,
        transcoder: Arc<dyn Transcoder>,
        artifact_store: Arc<dyn ArtifactStore>,
        language: String,
    ) -> Self {
        Self {
            transcriber,
            diarizer,
            transcoder,
            artifact_store,
            language,
        }
    }

    pub async fn transcribe_upload(
        &self,
        data: &[u8],
        original_filename: Option<&str>,
    ) -> Result<TranscriptionOutcome, PipelineError> {
        let base = ArtifactBase::generate();

        let extension = original_filename
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str());
        let upload_name = base.upload_name(extension);

        self.artifact_store.put(&upload_name, data).await?;
        let upload_path = self.artifact_store.resolve(&upload_name);
        tracing::debug!(upload = %upload_name, bytes = data.len(), "Upload persisted");

        let segments = self
            .transcriber
            .transcribe(&upload_path, &self.language)
            .await?;
        tracing::info!(segments = segments.len(), "Transcription completed");

        let plain_name = base.plain_transcript_name();
        self.artifact_store
            .put(&plain_name, render_plain_transcript(&segments).as_bytes())
            .await?;

        let normalized_name = base.normalized_audio_name();
        let normalized_path = self.artifact_store.resolve(&normalized_name);
        self.transcoder
            .transcode(
                &upload_path,
                &normalized_path,
                TARGET_SAMPLE_RATE_HZ,
                TARGET_CHANNELS,
            )
            .await?;
        tracing::debug!(normalized = %normalized_name, "Audio normalized for diarization");

        let turns = self.diarizer.diarize(&normalized_path).await?;
        tracing::info!(turns = turns.len(), "Diarization completed");

        let blocks = align(&segments, &turns);
        tracing::debug!(blocks = blocks.len(), "Transcript aligned to speaker turns");

        let speaker_name = base.speaker_transcript_name();
        self.artifact_store
            .put(&speaker_name, render_speaker_transcript(&blocks).as_bytes())
            .await?;

        Ok(TranscriptionOutcome {
            plain_transcript: plain_name,
            speaker_transcript: speaker_name,
        })
    }
}

/// File names of the two transcript artifacts one request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionOutcome {
    pub plain_transcript: String,
    pub speaker_transcript: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("artifact storage: {0}")]
    Artifact(#[from] ArtifactStoreError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("transcoding: {0}")]
    Transcoding(#[from] TranscodingError),
    #[error("diarization: {0}")]
    Diarization(#[from] DiarizationError),
}
