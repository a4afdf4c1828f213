use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{DiarizationError, Diarizer};
use crate::domain::SpeakerTurn;

const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/pyannote/speaker-diarization-3.1";

pub struct PyannoteApiDiarizer {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PyannoteApiDiarizer {
    pub fn new(endpoint: Option<String>, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            token,
        }
    }
}

/// The inference API has returned both a bare turn list and a wrapped
/// object depending on model revision.
#[derive(Deserialize)]
#[serde(untagged)]
enum DiarizationResponse {
    Wrapped { segments: Vec<ApiTurn> },
    Flat(Vec<ApiTurn>),
}

#[derive(Deserialize)]
struct ApiTurn {
    speaker: String,
    start: f64,
    end: f64,
}

#[async_trait]
impl Diarizer for PyannoteApiDiarizer {
    async fn diarize(&self, audio_path: &Path) -> Result<Vec<SpeakerTurn>, DiarizationError> {
        let audio_data = tokio::fs::read(audio_path).await?;

        tracing::debug!(
            endpoint = %self.endpoint,
            bytes = audio_data.len(),
            "Sending audio for speaker diarization"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "audio/wav")
            .body(audio_data)
            .send()
            .await
            .map_err(|e| DiarizationError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(DiarizationError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: DiarizationResponse = response
            .json()
            .await
            .map_err(|e| DiarizationError::InvalidResponse(format!("parse response: {}", e)))?;

        let api_turns = match result {
            DiarizationResponse::Wrapped { segments } => segments,
            DiarizationResponse::Flat(turns) => turns,
        };

        let mut turns: Vec<SpeakerTurn> = api_turns
            .into_iter()
            .map(|t| SpeakerTurn::new(t.start, t.end, t.speaker))
            .collect();

        // Rendering assumes chronological turns.
        turns.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(std::cmp::Ordering::Equal));

        tracing::info!(turns = turns.len(), "Speaker diarization completed");

        Ok(turns)
    }
}
