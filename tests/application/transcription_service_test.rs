use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use locutor::application::ports::{
    ArtifactStore, DiarizationError, Diarizer, Transcoder, TranscodingError, Transcriber,
    TranscriptionError,
};
use locutor::application::services::{PipelineError, TranscriptionService};
use locutor::domain::{SpeakerTurn, TranscriptSegment};
use locutor::infrastructure::storage::LocalArtifactStore;

struct StubTranscriber;

#[async_trait::async_trait]
impl Transcriber for StubTranscriber {
    async fn transcribe(
        &self,
        _audio_path: &Path,
        _language: &str,
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        Ok(vec![
            TranscriptSegment::new(0.0, 2.0, "Hola"),
            TranscriptSegment::new(2.0, 4.0, "como estas"),
            TranscriptSegment::new(5.0, 6.0, "bien"),
        ])
    }
}

struct RecordingTranscriber {
    seen: Arc<Mutex<Option<(PathBuf, String)>>>,
}

#[async_trait::async_trait]
impl Transcriber for RecordingTranscriber {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        *self.seen.lock().unwrap() = Some((audio_path.to_path_buf(), language.to_string()));
        Ok(vec![TranscriptSegment::new(0.0, 1.0, "hola")])
    }
}

struct StubDiarizer;

#[async_trait::async_trait]
impl Diarizer for StubDiarizer {
    async fn diarize(&self, _audio_path: &Path) -> Result<Vec<SpeakerTurn>, DiarizationError> {
        Ok(vec![
            SpeakerTurn::new(0.0, 4.0, "SPEAKER_00"),
            SpeakerTurn::new(4.0, 7.0, "SPEAKER_01"),
        ])
    }
}

struct FailingDiarizer;

#[async_trait::async_trait]
impl Diarizer for FailingDiarizer {
    async fn diarize(&self, _audio_path: &Path) -> Result<Vec<SpeakerTurn>, DiarizationError> {
        Err(DiarizationError::ApiRequestFailed("boom".to_string()))
    }
}

struct CopyTranscoder;

#[async_trait::async_trait]
impl Transcoder for CopyTranscoder {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        _sample_rate_hz: u32,
        _channels: u8,
    ) -> Result<(), TranscodingError> {
        tokio::fs::copy(input, output).await?;
        Ok(())
    }
}

struct RecordingTranscoder {
    seen: Arc<Mutex<Option<(PathBuf, PathBuf, u32, u8)>>>,
}

#[async_trait::async_trait]
impl Transcoder for RecordingTranscoder {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        sample_rate_hz: u32,
        channels: u8,
    ) -> Result<(), TranscodingError> {
        *self.seen.lock().unwrap() = Some((
            input.to_path_buf(),
            output.to_path_buf(),
            sample_rate_hz,
            channels,
        ));
        tokio::fs::write(output, b"normalized").await?;
        Ok(())
    }
}

struct FailingTranscoder;

#[async_trait::async_trait]
impl Transcoder for FailingTranscoder {
    async fn transcode(
        &self,
        _input: &Path,
        _output: &Path,
        _sample_rate_hz: u32,
        _channels: u8,
    ) -> Result<(), TranscodingError> {
        Err(TranscodingError::Failed("exit 1: conversion error".to_string()))
    }
}

fn service_with(
    transcriber: Arc<dyn Transcriber>,
    diarizer: Arc<dyn Diarizer>,
    transcoder: Arc<dyn Transcoder>,
    artifacts_dir: &Path,
) -> TranscriptionService<dyn Transcriber, dyn Diarizer> {
    let store: Arc<dyn ArtifactStore> =
        Arc::new(LocalArtifactStore::new(artifacts_dir.to_path_buf()).unwrap());
    TranscriptionService::new(transcriber, diarizer, transcoder, store, "es".to_string())
}

#[tokio::test]
async fn given_upload_when_pipeline_runs_then_artifact_names_share_base() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = service_with(
        Arc::new(StubTranscriber),
        Arc::new(StubDiarizer),
        Arc::new(CopyTranscoder),
        dir.path(),
    );

    let outcome = service
        .transcribe_upload(b"fake audio", Some("voz.m4a"))
        .await
        .unwrap();

    let base = outcome.plain_transcript.strip_suffix(".txt").unwrap();
    assert_eq!(
        outcome.speaker_transcript,
        format!("{}_hablantes.txt", base)
    );
}

#[tokio::test]
async fn given_two_uploads_when_pipeline_runs_then_bases_differ() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = service_with(
        Arc::new(StubTranscriber),
        Arc::new(StubDiarizer),
        Arc::new(CopyTranscoder),
        dir.path(),
    );

    let first = service
        .transcribe_upload(b"fake audio", Some("a.m4a"))
        .await
        .unwrap();
    let second = service
        .transcribe_upload(b"fake audio", Some("b.m4a"))
        .await
        .unwrap();

    assert_ne!(first.plain_transcript, second.plain_transcript);
}

#[tokio::test]
async fn given_upload_when_pipeline_runs_then_writes_all_four_artifacts() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = service_with(
        Arc::new(StubTranscriber),
        Arc::new(StubDiarizer),
        Arc::new(CopyTranscoder),
        dir.path(),
    );

    let outcome = service
        .transcribe_upload(b"fake audio", Some("voz.m4a"))
        .await
        .unwrap();

    let base = outcome
        .plain_transcript
        .strip_suffix(".txt")
        .unwrap()
        .to_string();
    assert!(dir.path().join(format!("{}.m4a", base)).exists());
    assert!(dir.path().join(format!("{}.txt", base)).exists());
    assert!(dir.path().join(format!("{}_opt.wav", base)).exists());
    assert!(dir.path().join(format!("{}_hablantes.txt", base)).exists());
}

#[tokio::test]
async fn given_upload_without_filename_when_pipeline_runs_then_default_extension_used() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = service_with(
        Arc::new(StubTranscriber),
        Arc::new(StubDiarizer),
        Arc::new(CopyTranscoder),
        dir.path(),
    );

    let outcome = service.transcribe_upload(b"fake audio", None).await.unwrap();

    let base = outcome
        .plain_transcript
        .strip_suffix(".txt")
        .unwrap()
        .to_string();
    assert!(dir.path().join(format!("{}.m4a", base)).exists());
}

#[tokio::test]
async fn given_transcriber_segments_when_pipeline_runs_then_plain_transcript_newline_joined() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = service_with(
        Arc::new(StubTranscriber),
        Arc::new(StubDiarizer),
        Arc::new(CopyTranscoder),
        dir.path(),
    );

    let outcome = service
        .transcribe_upload(b"fake audio", Some("voz.m4a"))
        .await
        .unwrap();

    let content = std::fs::read_to_string(dir.path().join(&outcome.plain_transcript)).unwrap();
    assert_eq!(content, "Hola\ncomo estas\nbien");
}

#[tokio::test]
async fn given_pipeline_when_transcribing_then_transcriber_receives_upload_path_and_language() {
    let dir = tempfile::TempDir::new().unwrap();
    let seen = Arc::new(Mutex::new(None));
    let service = service_with(
        Arc::new(RecordingTranscriber {
            seen: Arc::clone(&seen),
        }),
        Arc::new(StubDiarizer),
        Arc::new(CopyTranscoder),
        dir.path(),
    );

    service
        .transcribe_upload(b"fake audio", Some("voz.m4a"))
        .await
        .unwrap();

    let (path, language) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(language, "es");
    assert_eq!(path.extension().unwrap(), "m4a");
    assert!(path.exists());
}

#[tokio::test]
async fn given_pipeline_when_normalizing_then_requests_16khz_mono_wav() {
    let dir = tempfile::TempDir::new().unwrap();
    let seen = Arc::new(Mutex::new(None));
    let service = service_with(
        Arc::new(StubTranscriber),
        Arc::new(StubDiarizer),
        Arc::new(RecordingTranscoder {
            seen: Arc::clone(&seen),
        }),
        dir.path(),
    );

    service
        .transcribe_upload(b"fake audio", Some("voz.m4a"))
        .await
        .unwrap();

    let (input, output, sample_rate_hz, channels) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(sample_rate_hz, 16_000);
    assert_eq!(channels, 1);
    assert_eq!(input.extension().unwrap(), "m4a");
    assert!(output.to_string_lossy().ends_with("_opt.wav"));
}

#[tokio::test]
async fn given_transcoder_failure_when_pipeline_runs_then_plain_transcript_already_persisted() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = service_with(
        Arc::new(StubTranscriber),
        Arc::new(StubDiarizer),
        Arc::new(FailingTranscoder),
        dir.path(),
    );

    let result = service.transcribe_upload(b"fake audio", Some("voz.m4a")).await;

    assert!(matches!(result, Err(PipelineError::Transcoding(_))));

    let txt_written = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .any(|e| e.file_name().to_string_lossy().ends_with(".txt"));
    assert!(txt_written, "plain transcript must persist before the failure");
}

#[tokio::test]
async fn given_diarizer_failure_when_pipeline_runs_then_returns_diarization_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = service_with(
        Arc::new(StubTranscriber),
        Arc::new(FailingDiarizer),
        Arc::new(CopyTranscoder),
        dir.path(),
    );

    let result = service.transcribe_upload(b"fake audio", Some("voz.m4a")).await;

    assert!(matches!(result, Err(PipelineError::Diarization(_))));
}
