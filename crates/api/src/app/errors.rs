use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockcast_ai::AiError;

pub fn ai_error_to_response(err: AiError) -> axum::response::Response {
    let (status, code, message) = ai_error_parts(&err);
    json_error(status, code, message)
}

/// Status, machine-readable code and message for an `AiError`.
pub fn ai_error_parts(err: &AiError) -> (StatusCode, &'static str, String) {
    let code = match err {
        AiError::InsufficientData { .. } => "insufficient_data",
        AiError::UnsortedHistory { .. } => "unsorted_history",
        AiError::InvalidInput(_) => "validation_error",
        AiError::NotFitted => "not_fitted",
        AiError::InferenceFailed(_) => "forecasting_error",
    };
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!(error = %err, "internal forecasting failure");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, code, err.to_string())
}

/// Maps a failed body extraction to a 400 `validation_error`.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(
        StatusCode::BAD_REQUEST,
        "validation_error",
        rejection.body_text(),
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
