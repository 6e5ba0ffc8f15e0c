use axum::response::IntoResponse;
use tracing::debug;

pub async fn health() -> impl IntoResponse {
    debug!("Health check executed");
    "PONG"
}
