use uuid::Uuid;

const DEFAULT_UPLOAD_EXTENSION: &str = "m4a";
const MAX_EXTENSION_LEN: usize = 8;

/// Unique base name shared by all files one request produces.
///
/// For a base `B` the request writes `B.<ext>` (the upload), `B.txt` (plain
/// transcript), `B_opt.wav` (normalized audio) and `B_hablantes.txt`
/// (speaker-attributed transcript).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactBase(String);

impl ArtifactBase {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn from_name(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn upload_name(&self, extension: Option<&str>) -> String {
        let ext: String = extension
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .take(MAX_EXTENSION_LEN)
            .collect::<String>()
            .to_ascii_lowercase();
        if ext.is_empty() {
            format!("{}.{}", self.0, DEFAULT_UPLOAD_EXTENSION)
        } else {
            format!("{}.{}", self.0, ext)
        }
    }

    pub fn plain_transcript_name(&self) -> String {
        format!("{}.txt", self.0)
    }

    pub fn speaker_transcript_name(&self) -> String {
        format!("{}_hablantes.txt", self.0)
    }

    pub fn normalized_audio_name(&self) -> String {
        format!("{}_opt.wav", self.0)
    }
}
