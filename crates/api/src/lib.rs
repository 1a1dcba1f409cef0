//! HTTP API: server, routing, and request/response mapping for the forecasting core.

pub mod app;
pub mod config;
