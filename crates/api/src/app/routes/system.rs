use axum::{Json, http::StatusCode, response::IntoResponse};

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "stockcast",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "healthy" })))
}
