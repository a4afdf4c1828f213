use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{Diarizer, Transcriber};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{home_handler, transcribe_handler};
use crate::presentation::state::AppState;

pub fn create_router<T, D>(state: AppState<T, D>) -> Router
where
    T: Transcriber + 'static + ?Sized,
    D: Diarizer + 'static + ?Sized,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let max_upload_bytes = state.settings.server.max_upload_mb * 1024 * 1024;

    Router::new()
        .route("/", get(home_handler))
        .route("/transcribir", post(transcribe_handler::<T, D>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
