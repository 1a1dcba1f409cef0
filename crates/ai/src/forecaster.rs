//! Demand forecasting: calendar-feature regression with a widening confidence band.

use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

use crate::features::{calendar_features, design_matrix};
use crate::model::{ForecastPrediction, HistoricalDataPoint};
use crate::regression::LinearModel;
use crate::result::AiError;

/// Fewest observations a model will be fitted on.
pub const MIN_OBSERVATIONS: usize = 7;

/// Longest horizon a single prediction call may request.
pub const MAX_PERIODS_AHEAD: u32 = 365;

/// z for a two-sided ~95% interval under normally distributed residuals.
const CONFIDENCE_MULTIPLIER: f64 = 1.96;

/// Band growth per period beyond the first.
const UNCERTAINTY_GROWTH: f64 = 0.02;

/// State produced by a successful fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    model: LinearModel,
    residual_std: f64,
    base_date: NaiveDate,
    accuracy: f64,
}

impl FittedModel {
    /// Population standard deviation of the training residuals.
    pub fn residual_std(&self) -> f64 {
        self.residual_std
    }

    /// Date the trend feature is measured from (the first training observation).
    pub fn base_date(&self) -> NaiveDate {
        self.base_date
    }

    /// R² on the training set, clamped to `[0, 1]`.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Half-width of the confidence band for the `period`-th day ahead (1-indexed).
    pub fn margin(&self, period: u32) -> f64 {
        let growth = 1.0 + UNCERTAINTY_GROWTH * f64::from(period.saturating_sub(1));
        self.residual_std * CONFIDENCE_MULTIPLIER * growth
    }

    /// Forecast the `periods_ahead` days following `last_observed_date`, in date order.
    pub fn predict(
        &self,
        periods_ahead: u32,
        last_observed_date: NaiveDate,
    ) -> Result<Vec<ForecastPrediction>, AiError> {
        if !(1..=MAX_PERIODS_AHEAD).contains(&periods_ahead) {
            return Err(AiError::InvalidInput(format!(
                "periods_ahead must be between 1 and {MAX_PERIODS_AHEAD} (got {periods_ahead})"
            )));
        }

        let mut predictions = Vec::with_capacity(periods_ahead as usize);
        for period in 1..=periods_ahead {
            let date = last_observed_date
                .checked_add_days(Days::new(u64::from(period)))
                .ok_or_else(|| {
                    AiError::InvalidInput(format!(
                        "forecast horizon overflows the calendar after {last_observed_date}"
                    ))
                })?;

            // Trend keeps counting from the training base date, not from the last observation.
            let features = calendar_features(date, self.base_date);
            let predicted = self.model.predict(&features).max(0.0);
            let margin = self.margin(period);

            predictions.push(ForecastPrediction {
                date,
                predicted_quantity: predicted,
                confidence_lower: (predicted - margin).max(0.0),
                confidence_upper: predicted + margin,
            });
        }

        Ok(predictions)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
enum ModelState {
    #[default]
    Unfitted,
    Fitted(FittedModel),
}

/// Fit-then-predict demand model.
///
/// Intended lifecycle is one instance per forecast request:
/// construct, [`fit`](Self::fit), [`predict`](Self::predict), discard.
/// Independent instances can run on separate threads; a single instance is
/// not meant to be fitted concurrently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemandForecaster {
    state: ModelState,
}

impl DemandForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, ModelState::Fitted(_))
    }

    pub fn fitted(&self) -> Option<&FittedModel> {
        match &self.state {
            ModelState::Fitted(m) => Some(m),
            ModelState::Unfitted => None,
        }
    }

    /// Fit on `history` and return R² clamped to `[0, 1]`.
    ///
    /// `history` must be sorted by date ascending (equal dates allowed); its
    /// first element is the trend base date. Fitting again replaces the
    /// previous model.
    pub fn fit(&mut self, history: &[HistoricalDataPoint]) -> Result<f64, AiError> {
        if history.len() < MIN_OBSERVATIONS {
            return Err(AiError::InsufficientData {
                needed: MIN_OBSERVATIONS,
                got: history.len(),
            });
        }

        for (index, point) in history.iter().enumerate() {
            if !point.quantity.is_finite() || point.quantity < 0.0 {
                return Err(AiError::InvalidInput(format!(
                    "quantity at index {index} must be a finite non-negative number (got {})",
                    point.quantity
                )));
            }
        }
        if let Some(index) = history
            .windows(2)
            .position(|pair| pair[1].date < pair[0].date)
        {
            return Err(AiError::UnsortedHistory { index: index + 1 });
        }

        let base_date = history[0].date;
        let dates: Vec<NaiveDate> = history.iter().map(|p| p.date).collect();
        let targets: Vec<f64> = history.iter().map(|p| p.quantity).collect();

        let rows = design_matrix(&dates, base_date);
        let model = LinearModel::fit(&rows, &targets)?;

        let residuals: Vec<f64> = rows
            .iter()
            .zip(&targets)
            .map(|(row, y)| y - model.predict(row))
            .collect();
        let residual_std = population_std(&residuals);
        let accuracy = r_squared(&targets, &residuals);

        debug!(
            observations = history.len(),
            %base_date,
            residual_std,
            accuracy,
            "demand model fitted"
        );

        self.state = ModelState::Fitted(FittedModel {
            model,
            residual_std,
            base_date,
            accuracy,
        });
        Ok(accuracy)
    }

    /// Forecast the `periods_ahead` days following `last_observed_date`.
    ///
    /// Fails with [`AiError::NotFitted`] if [`fit`](Self::fit) has not succeeded.
    pub fn predict(
        &self,
        periods_ahead: u32,
        last_observed_date: NaiveDate,
    ) -> Result<Vec<ForecastPrediction>, AiError> {
        match &self.state {
            ModelState::Fitted(model) => model.predict(periods_ahead, last_observed_date),
            ModelState::Unfitted => Err(AiError::NotFitted),
        }
    }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}

/// Population standard deviation (n), matching how the band is calibrated.
fn population_std(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let m = mean(xs);
    let var = xs
        .iter()
        .map(|x| {
            let d = x - m;
            d * d
        })
        .sum::<f64>()
        / (xs.len() as f64);
    var.sqrt()
}

/// `1 - SS_res / SS_tot`, floored at 0 for worse-than-mean fits.
///
/// A constant target series has no variance to explain and scores 0.
fn r_squared(targets: &[f64], residuals: &[f64]) -> f64 {
    let m = mean(targets);
    let ss_tot = targets.iter().map(|y| (y - m) * (y - m)).sum::<f64>();
    let ss_res = residuals.iter().map(|r| r * r).sum::<f64>();

    if ss_tot == 0.0 {
        return 0.0;
    }
    let r2 = 1.0 - ss_res / ss_tot;
    if !(0.0..=1.0).contains(&r2) {
        warn!(r2, "in-sample R² outside [0, 1]; clamping");
    }
    if r2.is_finite() { r2.clamp(0.0, 1.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(offset: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    }

    fn history(quantities: &[f64]) -> Vec<HistoricalDataPoint> {
        quantities
            .iter()
            .enumerate()
            .map(|(i, q)| HistoricalDataPoint::new(day(i as u64), *q).unwrap())
            .collect()
    }

    #[test]
    fn fit_requires_seven_observations() {
        let mut f = DemandForecaster::new();
        let err = f.fit(&history(&[1.0; 6])).unwrap_err();
        assert_eq!(err, AiError::InsufficientData { needed: 7, got: 6 });
        assert!(!f.is_fitted());

        assert!(f.fit(&history(&[1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0])).is_ok());
        assert!(f.is_fitted());
    }

    #[test]
    fn failed_refit_keeps_previous_model() {
        let mut f = DemandForecaster::new();
        let data = history(&[10.0, 12.0, 11.0, 13.0, 12.0, 14.0, 13.0]);
        f.fit(&data).unwrap();
        let before = f.predict(3, day(6)).unwrap();

        let err = f.fit(&history(&[1.0; 6])).unwrap_err();
        assert_eq!(err, AiError::InsufficientData { needed: 7, got: 6 });

        assert!(f.is_fitted());
        assert_eq!(f.predict(3, day(6)).unwrap(), before);
    }

    #[test]
    fn predict_before_fit_is_rejected() {
        let f = DemandForecaster::new();
        assert_eq!(f.predict(3, day(0)).unwrap_err(), AiError::NotFitted);
    }

    #[test]
    fn unsorted_history_is_rejected() {
        let mut data = history(&[10.0, 12.0, 11.0, 13.0, 12.0, 14.0, 13.0]);
        data.swap(2, 4);
        let mut f = DemandForecaster::new();
        assert_eq!(f.fit(&data).unwrap_err(), AiError::UnsortedHistory { index: 3 });
    }

    #[test]
    fn repeated_dates_are_accepted() {
        let mut data = history(&[10.0, 12.0, 11.0, 13.0, 12.0, 14.0, 13.0]);
        data.insert(3, HistoricalDataPoint::new(data[2].date, 9.0).unwrap());
        let mut f = DemandForecaster::new();
        assert!(f.fit(&data).is_ok());
    }

    #[test]
    fn negative_quantities_are_rejected() {
        let mut data = history(&[10.0; 7]);
        data[4].quantity = -1.0;
        let mut f = DemandForecaster::new();
        assert!(matches!(f.fit(&data), Err(AiError::InvalidInput(_))));
    }

    #[test]
    fn perfect_trend_is_extrapolated_from_the_base_date() {
        // Two weeks inside March: month features are constant, day_of_year tracks trend.
        let quantities: Vec<f64> = (0..14).map(|i| 5.0 + 2.0 * i as f64).collect();
        let data = history(&quantities);
        let mut f = DemandForecaster::new();

        let accuracy = f.fit(&data).unwrap();
        assert!((accuracy - 1.0).abs() < 1e-9);

        let fitted = f.fitted().unwrap();
        assert_eq!(fitted.base_date(), day(0));
        assert!(fitted.residual_std() < 1e-6);

        let predictions = f.predict(3, day(13)).unwrap();
        let expected = [33.0, 35.0, 37.0];
        for (p, e) in predictions.iter().zip(expected) {
            assert!((p.predicted_quantity - e).abs() < 1e-6, "{p:?}");
        }
        assert_eq!(predictions[0].date, day(14));
        assert_eq!(predictions[2].date, day(16));
    }

    #[test]
    fn constant_series_scores_zero_accuracy() {
        let mut f = DemandForecaster::new();
        let accuracy = f.fit(&history(&[5.0; 10])).unwrap();
        assert_eq!(accuracy, 0.0);

        let p = f.predict(1, day(9)).unwrap();
        assert!((p[0].predicted_quantity - 5.0).abs() < 1e-9);
    }

    #[test]
    fn falling_demand_is_floored_at_zero() {
        let quantities: Vec<f64> = (0..10).map(|i| 90.0 - 10.0 * i as f64).collect();
        let mut f = DemandForecaster::new();
        f.fit(&history(&quantities)).unwrap();

        let predictions = f.predict(5, day(9)).unwrap();
        assert!(predictions.iter().all(|p| p.predicted_quantity == 0.0));
        assert!(predictions.iter().all(|p| p.confidence_lower == 0.0));
    }

    #[test]
    fn margin_grows_two_percent_per_period() {
        let mut f = DemandForecaster::new();
        f.fit(&history(&[10.0, 12.0, 11.0, 13.0, 12.0, 14.0, 13.0, 9.0, 15.0]))
            .unwrap();
        let fitted = f.fitted().unwrap();
        let sigma = fitted.residual_std();
        assert!(sigma > 0.0);

        assert!((fitted.margin(1) - sigma * 1.96).abs() < 1e-12);
        assert!((fitted.margin(11) - sigma * 1.96 * 1.2).abs() < 1e-12);
    }

    #[test]
    fn seven_day_scenario_produces_ordered_widening_predictions() {
        let data = history(&[10.0, 12.0, 11.0, 13.0, 12.0, 14.0, 13.0]);
        let mut f = DemandForecaster::new();

        let accuracy = f.fit(&data).unwrap();
        assert!(accuracy.is_finite());
        assert!((0.0..=1.0).contains(&accuracy));

        let predictions = f.predict(3, day(6)).unwrap();
        assert_eq!(predictions.len(), 3);
        for pair in predictions.windows(2) {
            assert!(pair[0].date < pair[1].date);
            assert!(pair[0].upper_margin() <= pair[1].upper_margin() + 1e-9);
        }
    }

    #[test]
    fn horizon_is_bounded() {
        let mut f = DemandForecaster::new();
        f.fit(&history(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])).unwrap();
        assert!(matches!(f.predict(0, day(6)), Err(AiError::InvalidInput(_))));
        assert!(matches!(f.predict(366, day(6)), Err(AiError::InvalidInput(_))));
        assert_eq!(f.predict(365, day(6)).unwrap().len(), 365);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: accuracy stays in [0, 1] and every band brackets its point
        /// forecast, with the band never narrowing further out.
        #[test]
        fn bands_are_ordered_and_accuracy_bounded(
            quantities in prop::collection::vec(0.0f64..1_000.0, 7..60),
            start_offset in 0u64..730,
            periods in 1u32..60,
        ) {
            let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + Days::new(start_offset);
            let data: Vec<HistoricalDataPoint> = quantities
                .iter()
                .enumerate()
                .map(|(i, q)| HistoricalDataPoint::new(start + Days::new(i as u64), *q).unwrap())
                .collect();
            let last = data[data.len() - 1].date;

            let mut f = DemandForecaster::new();
            let accuracy = f.fit(&data).unwrap();
            prop_assert!((0.0..=1.0).contains(&accuracy));

            let predictions = f.predict(periods, last).unwrap();
            prop_assert_eq!(predictions.len(), periods as usize);

            let fitted = f.fitted().unwrap();
            for (i, p) in predictions.iter().enumerate() {
                prop_assert!(p.confidence_lower >= 0.0);
                prop_assert!(p.confidence_lower <= p.predicted_quantity);
                prop_assert!(p.predicted_quantity <= p.confidence_upper);
                prop_assert!(fitted.margin(i as u32 + 1) <= fitted.margin(i as u32 + 2));
            }
        }
    }
}
