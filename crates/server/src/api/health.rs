use axum::Json;
use fiszki_api_types::HealthResponse;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
