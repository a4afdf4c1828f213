use crate::domain::{AlignedBlock, TranscriptSegment};

/// Newline-joined plain transcript, one trimmed line per segment.
pub fn render_plain_transcript(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(TranscriptSegment::text_trimmed)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Speaker-attributed transcript: one block per aligned block, blank line
/// between blocks. Each block reads `SPEAKER (H:MM:SS)` followed by the
/// block's text.
pub fn render_speaker_transcript(blocks: &[AlignedBlock]) -> String {
    blocks
        .iter()
        .map(|block| {
            format!(
                "{} ({})\n{}\n",
                block.speaker,
                format_timestamp(block.start),
                block.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `H:MM:SS` with whole seconds and unpadded hours, e.g. `0:01:05`.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{}:{:02}:{:02}", hours, minutes, secs)
}
