mod aligned_block;
mod artifact;
mod speaker_turn;
mod transcript;

pub use aligned_block::AlignedBlock;
pub use artifact::ArtifactBase;
pub use speaker_turn::SpeakerTurn;
pub use transcript::TranscriptSegment;
