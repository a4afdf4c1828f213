mod artifact_store;
mod diarizer;
mod transcoder;
mod transcriber;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use diarizer::{DiarizationError, Diarizer};
pub use transcoder::{Transcoder, TranscodingError};
pub use transcriber::{Transcriber, TranscriptionError};
