mod aligner;
mod transcript_render;
mod transcription_service;

pub use aligner::align;
pub use transcript_render::{format_timestamp, render_plain_transcript, render_speaker_transcript};
pub use transcription_service::{PipelineError, TranscriptionOutcome, TranscriptionService};
