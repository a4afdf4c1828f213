use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use locutor::application::services::TranscriptionService;
use locutor::infrastructure::audio::{TranscriberFactory, TranscriberProvider};
use locutor::infrastructure::diarization::PyannoteApiDiarizer;
use locutor::infrastructure::observability::{TracingConfig, init_tracing};
use locutor::infrastructure::storage::LocalArtifactStore;
use locutor::infrastructure::transcoding::{FfmpegTranscoder, check_ffmpeg_binary};
use locutor::presentation::{AppState, Settings, TranscriptionProviderSetting, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;

    init_tracing(TracingConfig::default(), settings.server.port);

    if let Err(e) = check_ffmpeg_binary() {
        tracing::warn!(error = %e, "ffmpeg unavailable; audio normalization will fail");
    }

    let provider = match settings.transcription.provider {
        TranscriptionProviderSetting::Local => TranscriberProvider::Local,
        TranscriptionProviderSetting::OpenAi => TranscriberProvider::OpenAi,
    };

    let transcriber = TranscriberFactory::create(
        provider,
        &settings.transcription.model,
        settings.transcription.api_key.clone(),
        settings.transcription.base_url.clone(),
    )?;

    let diarizer = Arc::new(PyannoteApiDiarizer::new(
        settings.diarization.endpoint.clone(),
        settings.diarization.token.clone(),
    ));

    let transcoder = Arc::new(FfmpegTranscoder);
    let artifact_store = Arc::new(LocalArtifactStore::new(settings.artifacts.dir.clone())?);

    let transcription_service = Arc::new(TranscriptionService::new(
        transcriber,
        diarizer,
        transcoder,
        artifact_store,
        settings.transcription.language.clone(),
    ));

    let state = AppState {
        transcription_service,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
