mod pyannote_api_diarizer;

pub use pyannote_api_diarizer::PyannoteApiDiarizer;
