use axum::Router;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use locutor::application::ports::{Transcriber, TranscriptionError};
use locutor::infrastructure::audio::OpenAiWhisperTranscriber;

async fn start_mock_whisper_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/audio/transcriptions",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn write_fake_audio(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("voz.m4a");
    std::fs::write(&path, b"fake audio bytes").unwrap();
    path
}

#[tokio::test]
async fn given_verbose_json_response_when_transcribing_then_returns_timed_segments() {
    let response_body = r#"{
        "task": "transcribe",
        "language": "spanish",
        "duration": 4.0,
        "text": " Hola como estas",
        "segments": [
            {"id": 0, "seek": 0, "start": 0.0, "end": 2.0, "text": " Hola"},
            {"id": 1, "seek": 0, "start": 2.0, "end": 4.0, "text": " como estas"}
        ]
    }"#;
    let (base_url, shutdown_tx) = start_mock_whisper_server(200, response_body).await;
    let dir = tempfile::TempDir::new().unwrap();
    let audio_path = write_fake_audio(&dir);

    let transcriber =
        OpenAiWhisperTranscriber::new("test-key".to_string(), Some(base_url), None);
    let segments = transcriber.transcribe(&audio_path, "es").await.unwrap();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].start, 0.0);
    assert_eq!(segments[0].end, 2.0);
    assert_eq!(segments[0].text, " Hola");
    assert_eq!(segments[1].text, " como estas");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_api_error_status_when_transcribing_then_returns_api_error() {
    let response_body = r#"{"error": {"message": "invalid audio"}}"#;
    let (base_url, shutdown_tx) = start_mock_whisper_server(400, response_body).await;
    let dir = tempfile::TempDir::new().unwrap();
    let audio_path = write_fake_audio(&dir);

    let transcriber =
        OpenAiWhisperTranscriber::new("test-key".to_string(), Some(base_url), None);
    let result = transcriber.transcribe(&audio_path, "es").await;

    assert!(matches!(
        result,
        Err(TranscriptionError::ApiRequestFailed(_))
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_response_without_segments_when_transcribing_then_returns_empty() {
    let response_body = r#"{"text": "hola"}"#;
    let (base_url, shutdown_tx) = start_mock_whisper_server(200, response_body).await;
    let dir = tempfile::TempDir::new().unwrap();
    let audio_path = write_fake_audio(&dir);

    let transcriber =
        OpenAiWhisperTranscriber::new("test-key".to_string(), Some(base_url), None);
    let segments = transcriber.transcribe(&audio_path, "es").await.unwrap();

    assert!(segments.is_empty());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_audio_file_when_transcribing_then_returns_audio_read_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let audio_path = dir.path().join("nope.m4a");

    let transcriber = OpenAiWhisperTranscriber::new(
        "test-key".to_string(),
        Some("http://127.0.0.1:9".to_string()),
        None,
    );
    let result = transcriber.transcribe(&audio_path, "es").await;

    assert!(matches!(result, Err(TranscriptionError::AudioRead(_))));
}
