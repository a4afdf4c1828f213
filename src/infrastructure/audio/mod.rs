pub mod audio_decoder;
mod candle_whisper_transcriber;
mod openai_whisper_transcriber;
mod transcriber_factory;

pub use candle_whisper_transcriber::CandleWhisperTranscriber;
pub use openai_whisper_transcriber::OpenAiWhisperTranscriber;
pub use transcriber_factory::{TranscriberFactory, TranscriberProvider};
