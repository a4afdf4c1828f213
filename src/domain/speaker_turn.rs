use super::transcript::TranscriptSegment;

#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerTurn {
    pub start: f64,
    pub end: f64,
    pub speaker: String,
}

impl SpeakerTurn {
    pub fn new(start: f64, end: f64, speaker: impl Into<String>) -> Self {
        Self {
            start,
            end,
            speaker: speaker.into(),
        }
    }

    /// Full temporal containment. Partial overlap does not count.
    pub fn contains(&self, segment: &TranscriptSegment) -> bool {
        segment.start >= self.start && segment.end <= self.end
    }
}
