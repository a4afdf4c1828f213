use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::TranscriptionError;

pub const TARGET_SAMPLE_RATE_HZ: u32 = 16_000;

/// Decode an audio file to mono f32 PCM at 16 kHz, downmixing and resampling
/// as needed. This is the in-process equivalent of the ffmpeg normalization
/// the diarization path uses.
pub fn decode_audio_file(path: &Path) -> Result<Vec<f32>, TranscriptionError> {
    let file = File::open(path)
        .map_err(|e| TranscriptionError::AudioRead(format!("{}: {}", path.display(), e)))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| TranscriptionError::DecodingFailed(format!("probe: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| TranscriptionError::DecodingFailed("no audio track found".to_string()))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let source_rate = codec_params
        .sample_rate
        .ok_or_else(|| TranscriptionError::DecodingFailed("unknown sample rate".to_string()))?;
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| TranscriptionError::DecodingFailed(format!("codec: {}", e)))?;

    let mut pcm: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(TranscriptionError::DecodingFailed(format!("packet: {}", e)));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                tracing::warn!(error = %e, "Skipping corrupt audio frame");
                continue;
            }
            Err(e) => {
                return Err(TranscriptionError::DecodingFailed(format!("decode: {}", e)));
            }
        };

        let spec = *decoded.spec();
        let frames = decoded.frames();
        if frames == 0 {
            continue;
        }

        let mut buffer = SampleBuffer::<f32>::new(frames as u64, spec);
        buffer.copy_interleaved_ref(decoded);
        fold_to_mono(buffer.samples(), channels, &mut pcm);
    }

    if pcm.is_empty() {
        return Err(TranscriptionError::DecodingFailed(
            "no audio samples decoded".to_string(),
        ));
    }

    if source_rate != TARGET_SAMPLE_RATE_HZ {
        pcm = resample(&pcm, source_rate, TARGET_SAMPLE_RATE_HZ)?;
    }

    tracing::debug!(
        samples = pcm.len(),
        duration_secs = pcm.len() as f32 / TARGET_SAMPLE_RATE_HZ as f32,
        "Audio decoded to 16kHz mono PCM"
    );

    Ok(pcm)
}

fn fold_to_mono(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels <= 1 {
        out.extend_from_slice(interleaved);
        return;
    }
    for frame in interleaved.chunks(channels) {
        out.push(frame.iter().sum::<f32>() / channels as f32);
    }
}

fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, TranscriptionError> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
    };

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;
    let chunk_size = 1024;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, chunk_size, 1)
        .map_err(|e| TranscriptionError::DecodingFailed(format!("resampler init: {}", e)))?;

    let mut output = Vec::with_capacity((samples.len() as f64 * ratio) as usize + chunk_size);

    for chunk in samples.chunks(chunk_size) {
        let input = if chunk.len() < chunk_size {
            let mut padded = chunk.to_vec();
            padded.resize(chunk_size, 0.0);
            padded
        } else {
            chunk.to_vec()
        };

        let result = resampler
            .process(&[input], None)
            .map_err(|e| TranscriptionError::DecodingFailed(format!("resample: {}", e)))?;

        if let Some(channel) = result.first() {
            output.extend_from_slice(channel);
        }
    }

    // The tail chunk was zero-padded; drop the excess.
    let expected_len = (samples.len() as f64 * ratio) as usize;
    output.truncate(expected_len);

    Ok(output)
}
