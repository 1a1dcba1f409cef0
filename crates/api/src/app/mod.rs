//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: scheduler wiring and the blocking-pool bridge
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: response mapping (rounding for presentation)
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use anyhow::Context;
use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use stockcast_ai::LocalAiScheduler;

use crate::config::ApiConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    let scheduler = LocalAiScheduler::new(config.forecast_workers)
        .context("failed to start forecast worker pool")?;
    let services = Arc::new(services::AppServices::new(scheduler));

    Ok(Router::new()
        .route("/", get(routes::system::root))
        .route("/health", get(routes::system::health))
        .nest("/api/forecast", routes::forecast::router())
        .layer(ServiceBuilder::new().layer(Extension(services))))
}
