use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{Diarizer, Transcriber};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub mensaje: String,
    pub archivo_sin_hablantes: String,
    pub archivo_con_hablantes: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<T, D>(
    State(state): State<AppState<T, D>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    T: Transcriber + 'static + ?Sized,
    D: Diarizer + 'static + ?Sized,
{
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Transcription request with no file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file uploaded".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    let filename = field.file_name().map(String::from);

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read file: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(
        filename = filename.as_deref().unwrap_or("unknown"),
        bytes = data.len(),
        "Audio upload received"
    );

    match state
        .transcription_service
        .transcribe_upload(&data, filename.as_deref())
        .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(TranscribeResponse {
                mensaje: "Transcripción completada".to_string(),
                archivo_sin_hablantes: outcome.plain_transcript,
                archivo_con_hablantes: outcome.speaker_transcript,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Transcription pipeline failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
