use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use tracing::info;

use stockcast_ai::{AiError, DemandForecastJob, ForecastRequest, ReorderRequest, ReorderSuggestionJob};
use stockcast_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/demand", post(forecast_demand))
        .route("/demand/batch", post(forecast_demand_batch))
        .route("/reorder-suggestion", post(reorder_suggestion))
}

pub async fn forecast_demand(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    if let Err(e) = body.validate() {
        return errors::ai_error_to_response(e);
    }

    info!(
        product_id = %body.product_id,
        observations = body.historical_data.len(),
        periods_ahead = body.periods_ahead,
        "demand forecast requested"
    );

    match services.run(DemandForecastJob::new(body)).await {
        Ok(resp) => (StatusCode::OK, Json(dto::forecast_to_json(resp))).into_response(),
        Err(e) => errors::ai_error_to_response(e),
    }
}

/// Forecast several products in one call; each entry succeeds or fails on its own.
pub async fn forecast_demand_batch(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::BatchForecastRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    if body.requests.is_empty() || body.requests.len() > dto::MAX_BATCH_SIZE {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            format!("requests must contain between 1 and {} entries", dto::MAX_BATCH_SIZE),
        );
    }

    info!(products = body.requests.len(), "batch demand forecast requested");

    // Invalid entries are answered directly; the rest go to the scheduler.
    let mut results: Vec<Option<serde_json::Value>> = vec![None; body.requests.len()];
    let mut jobs = Vec::new();
    let mut pending: Vec<(usize, ProductId)> = Vec::new();
    for (slot, request) in body.requests.into_iter().enumerate() {
        match request.validate() {
            Ok(()) => {
                pending.push((slot, request.product_id));
                jobs.push(DemandForecastJob::new(request));
            }
            Err(e) => results[slot] = Some(batch_error_entry(request.product_id, &e)),
        }
    }

    let outcomes = match services.run_batch(jobs).await {
        Ok(o) => o,
        Err(e) => return errors::ai_error_to_response(e),
    };

    for ((slot, product_id), outcome) in pending.into_iter().zip(outcomes) {
        results[slot] = Some(match outcome {
            Ok(resp) => serde_json::json!({
                "product_id": product_id,
                "forecast": dto::forecast_to_json(resp),
            }),
            Err(e) => batch_error_entry(product_id, &e),
        });
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "count": results.len(),
            "results": results.into_iter().flatten().collect::<Vec<_>>(),
        })),
    )
        .into_response()
}

fn batch_error_entry(product_id: ProductId, err: &AiError) -> serde_json::Value {
    let (_, code, message) = errors::ai_error_parts(err);
    serde_json::json!({
        "product_id": product_id,
        "error": code,
        "message": message,
    })
}

pub async fn reorder_suggestion(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    if let Err(e) = body.validate() {
        return errors::ai_error_to_response(e);
    }

    info!(
        product_id = %body.product_id,
        service_level = body.service_level,
        lead_time_days = body.lead_time_days,
        "reorder suggestion requested"
    );

    match services.run(ReorderSuggestionJob::new(body)).await {
        Ok(s) => (StatusCode::OK, Json(dto::reorder_to_json(s))).into_response(),
        Err(e) => errors::ai_error_to_response(e),
    }
}
