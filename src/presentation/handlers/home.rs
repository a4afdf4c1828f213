use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct HomeResponse {
    pub message: String,
}

pub async fn home_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HomeResponse {
            message: "API de transcripción activa".to_string(),
        }),
    )
}
