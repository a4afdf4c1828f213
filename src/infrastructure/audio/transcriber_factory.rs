use std::sync::Arc;

use crate::application::ports::{Transcriber, TranscriptionError};

use super::candle_whisper_transcriber::CandleWhisperTranscriber;
use super::openai_whisper_transcriber::OpenAiWhisperTranscriber;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranscriberProvider {
    Local,
    OpenAi,
}

pub struct TranscriberFactory;

impl TranscriberFactory {
    pub fn create(
        provider: TranscriberProvider,
        model: &str,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Result<Arc<dyn Transcriber>, TranscriptionError> {
        match provider {
            TranscriberProvider::Local => {
                let transcriber = CandleWhisperTranscriber::new(model)?;
                Ok(Arc::new(transcriber))
            }
            TranscriberProvider::OpenAi => {
                let key = api_key.ok_or_else(|| {
                    TranscriptionError::ModelLoadFailed(
                        "API key required for OpenAI Whisper".to_string(),
                    )
                })?;
                let transcriber = OpenAiWhisperTranscriber::new(key, base_url, Some(model.to_string()));
                Ok(Arc::new(transcriber))
            }
        }
    }
}
