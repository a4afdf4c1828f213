pub mod audio;
pub mod diarization;
pub mod observability;
pub mod storage;
pub mod transcoding;
