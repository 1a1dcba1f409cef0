//! `stockcast-ai`
//!
//! **Responsibility:** the numeric core of demand planning.
//!
//! - [`DemandForecaster`]: calendar-feature linear regression with a widening
//!   confidence band.
//! - [`ReorderOptimizer`]: safety stock, reorder point, EOQ and savings.
//!
//! Everything here is synchronous and stateless across calls: inputs are
//! provided by callers (the HTTP layer, batch workers) and nothing is persisted.

pub mod demand_forecast;
pub mod features;
pub mod forecaster;
pub mod job;
pub mod model;
pub mod regression;
pub mod reorder;
pub mod reorder_suggestion;
pub mod result;
pub mod scheduler;
pub mod z_score;

pub use demand_forecast::DemandForecastJob;
pub use forecaster::{DemandForecaster, FittedModel, MAX_PERIODS_AHEAD, MIN_OBSERVATIONS};
pub use job::AiJob;
pub use model::{
    ForecastPrediction, ForecastRequest, ForecastResponse, HistoricalDataPoint, ReorderRequest,
    ReorderSuggestion,
};
pub use reorder::ReorderOptimizer;
pub use reorder_suggestion::ReorderSuggestionJob;
pub use result::AiError;
pub use scheduler::{AiScheduler, LocalAiScheduler};
