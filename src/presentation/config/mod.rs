mod settings;

pub use settings::{
    ArtifactSettings, DiarizationSettings, ServerSettings, Settings, SettingsError,
    TranscriptionProviderSetting, TranscriptionSettings,
};
