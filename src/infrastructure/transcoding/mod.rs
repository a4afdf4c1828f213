mod ffmpeg_transcoder;

pub use ffmpeg_transcoder::{check_ffmpeg_binary, FfmpegTranscoder};
