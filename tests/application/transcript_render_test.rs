use locutor::application::services::{
    format_timestamp, render_plain_transcript, render_speaker_transcript,
};
use locutor::domain::{AlignedBlock, TranscriptSegment};

#[test]
fn given_segments_when_rendering_plain_then_one_trimmed_line_per_segment() {
    let segments = vec![
        TranscriptSegment::new(0.0, 2.0, " Hola "),
        TranscriptSegment::new(2.0, 4.0, "qué tal"),
    ];

    let rendered = render_plain_transcript(&segments);

    assert_eq!(rendered, "Hola\nqué tal");
}

#[test]
fn given_no_segments_when_rendering_plain_then_empty_string() {
    assert_eq!(render_plain_transcript(&[]), "");
}

#[test]
fn given_blocks_when_rendering_speakers_then_blank_line_between_blocks() {
    let blocks = vec![
        AlignedBlock {
            speaker: "SPEAKER_00".to_string(),
            start: 0.0,
            text: "Hola como estas".to_string(),
        },
        AlignedBlock {
            speaker: "SPEAKER_01".to_string(),
            start: 65.0,
            text: "bien".to_string(),
        },
    ];

    let rendered = render_speaker_transcript(&blocks);

    assert_eq!(
        rendered,
        "SPEAKER_00 (0:00:00)\nHola como estas\n\nSPEAKER_01 (0:01:05)\nbien\n"
    );
}

#[test]
fn given_single_block_when_rendering_speakers_then_block_ends_with_newline() {
    let blocks = vec![AlignedBlock {
        speaker: "A".to_string(),
        start: 1.0,
        text: "hola".to_string(),
    }];

    assert_eq!(render_speaker_transcript(&blocks), "A (0:00:01)\nhola\n");
}

#[test]
fn given_no_blocks_when_rendering_speakers_then_empty_string() {
    assert_eq!(render_speaker_transcript(&[]), "");
}

#[test]
fn given_zero_seconds_when_formatting_then_zero_timestamp() {
    assert_eq!(format_timestamp(0.0), "0:00:00");
}

#[test]
fn given_sub_second_fraction_when_formatting_then_truncates_to_whole_seconds() {
    assert_eq!(format_timestamp(59.9), "0:00:59");
}

#[test]
fn given_over_an_hour_when_formatting_then_hours_unpadded() {
    assert_eq!(format_timestamp(3661.0), "1:01:01");
}

#[test]
fn given_many_hours_when_formatting_then_hours_grow_unpadded() {
    assert_eq!(format_timestamp(36_125.0), "10:02:05");
}

#[test]
fn given_negative_seconds_when_formatting_then_clamps_to_zero() {
    assert_eq!(format_timestamp(-5.0), "0:00:00");
}
