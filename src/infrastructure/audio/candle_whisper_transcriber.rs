use std::path::Path;

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::TranscriptSegment;

use super::audio_decoder::decode_audio_file;

/// Granularity of Whisper timestamp tokens.
const TIMESTAMP_STRIDE_SECS: f64 = 0.02;
const MAX_DECODE_TOKENS: usize = 224;

pub struct CandleWhisperTranscriber {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
}

impl CandleWhisperTranscriber {
    pub fn new(model_id: &str) -> Result<Self, TranscriptionError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing Candle Whisper transcriber"
        );

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let mel_repo = api.repo(Repo::new(
            "FL33TW00D-HF/whisper-base".to_string(),
            RepoType::Model,
        ));
        let mel_bytes_path = mel_repo
            .get("melfilters.bytes")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("melfilters.bytes: {}", e)))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!("Candle Whisper transcriber loaded successfully");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            mel_filters,
        })
    }
}

#[async_trait]
impl Transcriber for CandleWhisperTranscriber {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        let pcm = decode_audio_file(audio_path)?;

        let mut mel_tensors = Vec::new();

        for (i, chunk) in pcm.chunks(m::N_SAMPLES).enumerate() {
            let window_duration = chunk.len() as f64 / m::SAMPLE_RATE as f64;
            let samples = if chunk.len() < m::N_SAMPLES {
                let mut padded = chunk.to_vec();
                padded.resize(m::N_SAMPLES, 0.0);
                padded
            } else {
                chunk.to_vec()
            };

            let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
            let n_mel = self.config.num_mel_bins;
            let n_frames = mel_data.len() / n_mel;

            let mel_tensor = Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
                .map_err(|e| {
                    TranscriptionError::TranscriptionFailed(format!("mel tensor: {}", e))
                })?;

            mel_tensors.push((i, window_duration, mel_tensor));
        }

        let mut model = self.model.lock().await;
        let mut segments: Vec<TranscriptSegment> = Vec::new();

        for (i, window_duration, mel_tensor) in mel_tensors {
            let window_offset = (i * m::N_SAMPLES) as f64 / m::SAMPLE_RATE as f64;
            tracing::debug!(window = i, offset_secs = window_offset, "Transcribing audio window");
            let window_segments = decode_window(
                &mut model,
                &self.tokenizer,
                &self.device,
                &mel_tensor,
                language,
                window_offset,
                window_duration,
            )?;
            segments.extend(window_segments);
        }

        tracing::info!(segments = segments.len(), "Audio transcription completed");

        Ok(segments)
    }
}

/// Greedy-decode one 30s window into timestamped segments.
///
/// The decoder prompt deliberately omits the no-timestamps token so the model
/// emits timestamp tokens delimiting each phrase. Timestamp token ids sit
/// above the no-timestamps id and encode time in 20ms steps.
fn decode_window(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    mel: &Tensor,
    language: &str,
    window_offset: f64,
    window_duration: f64,
) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
    let sot_token = token_id(tokenizer, m::SOT_TOKEN)?;
    let transcribe_token = token_id(tokenizer, m::TRANSCRIBE_TOKEN)?;
    let no_timestamps_token = token_id(tokenizer, m::NO_TIMESTAMPS_TOKEN)?;
    let eot_token = token_id(tokenizer, m::EOT_TOKEN)?;
    let language_token = token_id(tokenizer, &format!("<|{}|>", language))?;

    let audio_features = model
        .encoder
        .forward(mel, true)
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("encoder: {}", e)))?;

    let mut tokens = vec![sot_token, language_token, transcribe_token];
    let prefix_len = tokens.len();

    let mut segments: Vec<TranscriptSegment> = Vec::new();
    let mut segment_start: Option<f64> = None;
    let mut text_ids: Vec<u32> = Vec::new();

    for _ in 0..MAX_DECODE_TOKENS {
        let token_tensor = Tensor::new(tokens.as_slice(), device)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?
            .unsqueeze(0)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

        let decoder_output = model
            .decoder
            .forward(&token_tensor, &audio_features, tokens.len() == prefix_len)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("decoder: {}", e)))?;

        let logits = model
            .decoder
            .final_linear(
                &decoder_output
                    .squeeze(0)
                    .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?,
            )
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("linear: {}", e)))?;

        let seq_len = logits
            .dim(0)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;
        let last_logits = logits
            .get(seq_len - 1)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

        let next_token = last_logits
            .argmax(0)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?
            .to_scalar::<u32>()
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

        if next_token == eot_token {
            break;
        }

        tokens.push(next_token);

        if next_token > no_timestamps_token {
            let time = window_offset
                + (next_token - no_timestamps_token - 1) as f64 * TIMESTAMP_STRIDE_SECS;
            flush_segment(
                &mut segments,
                tokenizer,
                segment_start.take().unwrap_or(window_offset),
                time,
                &mut text_ids,
            )?;
            segment_start = Some(time);
        } else if next_token < eot_token {
            text_ids.push(next_token);
        }
    }

    // The model can hit end-of-text before emitting a closing timestamp;
    // close the trailing segment at the end of the window.
    flush_segment(
        &mut segments,
        tokenizer,
        segment_start.take().unwrap_or(window_offset),
        window_offset + window_duration,
        &mut text_ids,
    )?;

    model.reset_kv_cache();

    Ok(segments)
}

fn flush_segment(
    segments: &mut Vec<TranscriptSegment>,
    tokenizer: &Tokenizer,
    start: f64,
    end: f64,
    text_ids: &mut Vec<u32>,
) -> Result<(), TranscriptionError> {
    if !text_ids.is_empty() {
        let text = tokenizer
            .decode(text_ids, true)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("detokenize: {}", e)))?;
        if !text.trim().is_empty() {
            segments.push(TranscriptSegment::new(start, end, text));
        }
    }
    text_ids.clear();
    Ok(())
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    let filters: Vec<f32> = bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(filters)
}
