use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub diarization: DiarizationSettings,
    pub artifacts: ArtifactSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    pub model: String,
    pub language: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionProviderSetting {
    Local,
    OpenAi,
}

impl TryFrom<String> for TranscriptionProviderSetting {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!(
                "Invalid transcription provider: {}. Expected: local or openai",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiarizationSettings {
    pub endpoint: Option<String>,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct ArtifactSettings {
    pub dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

impl Settings {
    /// Build settings from process environment variables, applying defaults
    /// for everything except the diarization token.
    pub fn from_env() -> Result<Self, SettingsError> {
        let server = ServerSettings {
            port: read_parsed("SERVER_PORT", 3000)?,
            max_upload_mb: read_parsed("MAX_UPLOAD_MB", 100)?,
        };

        let provider_raw =
            read_optional("TRANSCRIPTION_PROVIDER").unwrap_or_else(|| "local".to_string());
        let provider = TranscriptionProviderSetting::try_from(provider_raw).map_err(|reason| {
            SettingsError::InvalidVar {
                name: "TRANSCRIPTION_PROVIDER",
                reason,
            }
        })?;

        let transcription = TranscriptionSettings {
            provider,
            model: read_optional("WHISPER_MODEL")
                .unwrap_or_else(|| "openai/whisper-medium".to_string()),
            language: read_optional("TRANSCRIPTION_LANGUAGE").unwrap_or_else(|| "es".to_string()),
            api_key: read_optional("OPENAI_API_KEY"),
            base_url: read_optional("OPENAI_BASE_URL"),
        };

        let diarization = DiarizationSettings {
            endpoint: read_optional("DIARIZATION_ENDPOINT"),
            token: read_optional("HUGGINGFACE_TOKEN")
                .ok_or(SettingsError::MissingVar("HUGGINGFACE_TOKEN"))?,
        };

        let artifacts = ArtifactSettings {
            dir: read_optional("ARTIFACTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
        };

        Ok(Self {
            server,
            transcription,
            diarization,
            artifacts,
        })
    }
}

fn read_optional(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn read_parsed<T>(name: &'static str, default: T) -> Result<T, SettingsError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match read_optional(name) {
        Some(raw) => raw.parse().map_err(|e: T::Err| SettingsError::InvalidVar {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
