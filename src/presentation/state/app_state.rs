use std::sync::Arc;

use crate::application::ports::{Diarizer, Transcriber};
use crate::application::services::TranscriptionService;
use crate::presentation::config::Settings;

pub struct AppState<T: ?Sized, D: ?Sized>
where
    T: Transcriber,
    D: Diarizer,
{
    pub transcription_service: Arc<TranscriptionService<T, D>>,
    pub settings: Settings,
}

impl<T: ?Sized, D: ?Sized> Clone for AppState<T, D>
where
    T: Transcriber,
    D: Diarizer,
{
    fn clone(&self) -> Self {
        Self {
            transcription_service: Arc::clone(&self.transcription_service),
            settings: self.settings.clone(),
        }
    }
}
