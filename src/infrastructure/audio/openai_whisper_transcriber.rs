use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::TranscriptSegment;

pub struct OpenAiWhisperTranscriber {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    #[serde(default)]
    segments: Vec<ApiSegment>,
}

#[derive(Debug, Deserialize)]
struct ApiSegment {
    start: f64,
    end: f64,
    text: String,
}

impl OpenAiWhisperTranscriber {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
        }
    }
}

#[async_trait]
impl Transcriber for OpenAiWhisperTranscriber {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let audio_data = tokio::fs::read(audio_path)
            .await
            .map_err(|e| TranscriptionError::AudioRead(format!("{}: {}", audio_path.display(), e)))?;

        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();

        let file_part = multipart::Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        // verbose_json is the only response format carrying segment timings.
        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("language", language.to_string())
            .text("response_format", "verbose_json")
            .part("file", file_part);

        tracing::debug!(model = %self.model, language, "Sending audio to OpenAI Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcription: VerboseTranscription = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("body: {}", e)))?;

        let segments: Vec<TranscriptSegment> = transcription
            .segments
            .into_iter()
            .map(|s| TranscriptSegment::new(s.start, s.end, s.text))
            .collect();

        tracing::info!(
            segments = segments.len(),
            "OpenAI Whisper transcription completed"
        );

        Ok(segments)
    }
}
