use crate::domain::{AlignedBlock, SpeakerTurn, TranscriptSegment};

/// Attribute transcript segments to the speaker turns that fully contain
/// them.
///
/// For each turn, in order, every segment whose interval lies entirely inside
/// the turn contributes its trimmed text; the texts are joined with single
/// spaces in transcript order. A turn whose joined text is empty produces no
/// block. A segment contained in no turn, including one straddling a turn
/// boundary, is dropped from the output.
pub fn align(segments: &[TranscriptSegment], turns: &[SpeakerTurn]) -> Vec<AlignedBlock> {
    let mut blocks = Vec::with_capacity(turns.len());

    for turn in turns {
        let joined = segments
            .iter()
            .filter(|segment| turn.contains(segment))
            .map(TranscriptSegment::text_trimmed)
            .collect::<Vec<_>>()
            .join(" ");

        let text = joined.trim();
        if text.is_empty() {
            continue;
        }

        blocks.push(AlignedBlock {
            speaker: turn.speaker.clone(),
            start: turn.start,
            text: text.to_string(),
        });
    }

    blocks
}
