//! Inputs and outputs of the forecasting and replenishment jobs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockcast_core::{DomainError, DomainResult, ProductId, ValueObject};

use crate::forecaster::{MAX_PERIODS_AHEAD, MIN_OBSERVATIONS};
use crate::result::AiError;

/// One observed demand sample for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDataPoint {
    pub date: NaiveDate,
    pub quantity: f64,
}

impl HistoricalDataPoint {
    pub fn new(date: NaiveDate, quantity: f64) -> DomainResult<Self> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(DomainError::validation(format!(
                "quantity on {date} must be a finite non-negative number (got {quantity})"
            )));
        }
        Ok(Self { date, quantity })
    }
}

impl ValueObject for HistoricalDataPoint {}

/// Forecast for a single future day.
///
/// Invariant: `0 <= confidence_lower <= predicted_quantity <= confidence_upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPrediction {
    pub date: NaiveDate,
    pub predicted_quantity: f64,
    pub confidence_lower: f64,
    pub confidence_upper: f64,
}

impl ForecastPrediction {
    /// Half-width of the band above the point forecast.
    pub fn upper_margin(&self) -> f64 {
        self.confidence_upper - self.predicted_quantity
    }
}

impl ValueObject for ForecastPrediction {}

fn default_periods_ahead() -> u32 {
    30
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub product_id: ProductId,
    pub historical_data: Vec<HistoricalDataPoint>,
    #[serde(default = "default_periods_ahead")]
    pub periods_ahead: u32,
}

impl ForecastRequest {
    /// Range checks performed by the request layer before a job is built.
    pub fn validate(&self) -> Result<(), AiError> {
        if self.historical_data.len() < MIN_OBSERVATIONS {
            return Err(AiError::InsufficientData {
                needed: MIN_OBSERVATIONS,
                got: self.historical_data.len(),
            });
        }
        if !(1..=MAX_PERIODS_AHEAD).contains(&self.periods_ahead) {
            return Err(AiError::InvalidInput(format!(
                "periods_ahead must be between 1 and {MAX_PERIODS_AHEAD} (got {})",
                self.periods_ahead
            )));
        }
        for point in &self.historical_data {
            HistoricalDataPoint::new(point.date, point.quantity)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub product_id: ProductId,
    pub predictions: Vec<ForecastPrediction>,
    /// R² of the fit on the training data, clamped to `[0, 1]`.
    pub model_accuracy: f64,
}

fn default_service_level() -> f64 {
    0.95
}

/// Lowest service level accepted from callers.
pub const MIN_SERVICE_LEVEL: f64 = 0.5;
/// Highest service level accepted from callers.
pub const MAX_SERVICE_LEVEL: f64 = 0.99;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub product_id: ProductId,
    pub average_daily_demand: f64,
    pub demand_std_dev: f64,
    pub lead_time_days: u32,
    pub ordering_cost: f64,
    pub holding_cost_per_unit: f64,
    /// Carried for reporting; the cost model does not price inventory.
    pub unit_price: f64,
    #[serde(default = "default_service_level")]
    pub service_level: f64,
}

impl ReorderRequest {
    pub fn validate(&self) -> Result<(), AiError> {
        let non_negative = [
            ("average_daily_demand", self.average_daily_demand),
            ("demand_std_dev", self.demand_std_dev),
            ("ordering_cost", self.ordering_cost),
            ("holding_cost_per_unit", self.holding_cost_per_unit),
            ("unit_price", self.unit_price),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(AiError::InvalidInput(format!(
                    "{field} must be a finite non-negative number (got {value})"
                )));
            }
        }

        if !(MIN_SERVICE_LEVEL..=MAX_SERVICE_LEVEL).contains(&self.service_level) {
            return Err(AiError::InvalidInput(format!(
                "service_level must be between {MIN_SERVICE_LEVEL} and {MAX_SERVICE_LEVEL} (got {})",
                self.service_level
            )));
        }
        Ok(())
    }
}

/// Replenishment parameters for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderSuggestion {
    pub product_id: ProductId,
    pub reorder_point: i64,
    pub reorder_quantity: i64,
    pub safety_stock: i64,
    pub economic_order_quantity: i64,
    pub estimated_annual_savings: f64,
}

impl ValueObject for ReorderSuggestion {}
