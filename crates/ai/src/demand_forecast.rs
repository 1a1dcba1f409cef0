use stockcast_core::ProductId;

use crate::forecaster::{DemandForecaster, MIN_OBSERVATIONS};
use crate::job::AiJob;
use crate::model::{ForecastRequest, ForecastResponse};
use crate::result::AiError;

/// Forecast job: sort history, fit a fresh [`DemandForecaster`], predict forward.
#[derive(Debug, Clone)]
pub struct DemandForecastJob {
    input: ForecastRequest,
}

impl DemandForecastJob {
    pub fn new(input: ForecastRequest) -> Self {
        Self { input }
    }
}

impl AiJob for DemandForecastJob {
    type Input = ForecastRequest;
    type Output = ForecastResponse;

    fn product_id(&self) -> ProductId {
        self.input.product_id
    }

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn run(&self) -> Result<ForecastResponse, AiError> {
        let mut history = self.input.historical_data.clone();
        // Stable: observations sharing a date keep their submitted order.
        history.sort_by_key(|p| p.date);

        let mut forecaster = DemandForecaster::new();
        let model_accuracy = forecaster.fit(&history)?;

        let last_observed_date = history
            .last()
            .map(|p| p.date)
            .ok_or(AiError::InsufficientData {
                needed: MIN_OBSERVATIONS,
                got: 0,
            })?;
        let predictions = forecaster.predict(self.input.periods_ahead, last_observed_date)?;

        Ok(ForecastResponse {
            product_id: self.input.product_id,
            predictions,
            model_accuracy,
        })
    }
}
