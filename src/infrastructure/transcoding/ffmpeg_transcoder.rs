use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{Transcoder, TranscodingError};

/// Verify the ffmpeg binary is reachable before accepting work.
pub fn check_ffmpeg_binary() -> Result<(), TranscodingError> {
    let output = std::process::Command::new("ffmpeg")
        .arg("-version")
        .output();

    match output {
        Ok(o) if o.status.success() => Ok(()),
        Ok(o) => Err(TranscodingError::ToolUnavailable(format!(
            "ffmpeg -version exited with {}",
            o.status
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(
            TranscodingError::ToolUnavailable("ffmpeg not found in PATH".to_string()),
        ),
        Err(e) => Err(TranscodingError::Io(e)),
    }
}

pub struct FfmpegTranscoder;

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        sample_rate_hz: u32,
        channels: u8,
    ) -> Result<(), TranscodingError> {
        let result = tokio::process::Command::new("ffmpeg")
            .args(["-hide_banner", "-loglevel", "error", "-y", "-i"])
            .arg(input)
            .args(["-ar", &sample_rate_hz.to_string()])
            .args(["-ac", &channels.to_string()])
            .arg(output)
            .output()
            .await;

        let run = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TranscodingError::ToolUnavailable(
                    "ffmpeg not found in PATH".to_string(),
                ));
            }
            Err(e) => return Err(TranscodingError::Io(e)),
        };

        if !run.status.success() {
            let stderr = String::from_utf8_lossy(&run.stderr);
            return Err(TranscodingError::Failed(format!(
                "exit {}: {}",
                run.status,
                stderr_tail(&stderr)
            )));
        }

        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            sample_rate_hz,
            channels,
            "Audio normalized via ffmpeg"
        );

        Ok(())
    }
}

fn stderr_tail(stderr: &str) -> String {
    let mut lines: Vec<&str> = stderr.lines().rev().take(4).collect();
    lines.reverse();
    if lines.is_empty() {
        "no stderr output".to_string()
    } else {
        lines.join(" | ")
    }
}
