//! Response mapping.
//!
//! The numeric core works at full precision; clients get quantities and
//! savings rounded to cents and accuracy to four places.

use serde::Deserialize;

use stockcast_ai::{ForecastRequest, ForecastResponse, ReorderSuggestion};

/// Upper bound on products per batch request.
pub const MAX_BATCH_SIZE: usize = 500;

#[derive(Debug, Deserialize)]
pub struct BatchForecastRequest {
    pub requests: Vec<ForecastRequest>,
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub fn forecast_to_json(resp: ForecastResponse) -> serde_json::Value {
    let predictions: Vec<serde_json::Value> = resp
        .predictions
        .iter()
        .map(|p| {
            serde_json::json!({
                "date": p.date,
                "predicted_quantity": round_to(p.predicted_quantity, 2),
                "confidence_lower": round_to(p.confidence_lower, 2),
                "confidence_upper": round_to(p.confidence_upper, 2),
            })
        })
        .collect();

    serde_json::json!({
        "product_id": resp.product_id,
        "predictions": predictions,
        "model_accuracy": round_to(resp.model_accuracy, 4),
    })
}

pub fn reorder_to_json(s: ReorderSuggestion) -> serde_json::Value {
    serde_json::json!({
        "product_id": s.product_id,
        "reorder_point": s.reorder_point,
        "reorder_quantity": s.reorder_quantity,
        "safety_stock": s.safety_stock,
        "economic_order_quantity": s.economic_order_quantity,
        "estimated_annual_savings": round_to(s.estimated_annual_savings, 2),
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use stockcast_ai::ForecastPrediction;
    use stockcast_core::ProductId;

    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to(1.005_000_1, 2), 1.01);
        assert_eq!(round_to(2.344, 2), 2.34);
        assert_eq!(round_to(0.123_456, 4), 0.1235);
    }

    #[test]
    fn forecast_json_uses_iso_dates_and_rounded_values() {
        let resp = ForecastResponse {
            product_id: ProductId::new(8),
            predictions: vec![ForecastPrediction {
                date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
                predicted_quantity: 12.345_67,
                confidence_lower: 10.001,
                confidence_upper: 14.689_9,
            }],
            model_accuracy: 0.876_54,
        };

        let json = forecast_to_json(resp);

        assert_eq!(json["product_id"], 8);
        assert_eq!(json["model_accuracy"], 0.8765);
        assert_eq!(json["predictions"][0]["date"], "2024-03-08");
        assert_eq!(json["predictions"][0]["predicted_quantity"], 12.35);
        assert_eq!(json["predictions"][0]["confidence_lower"], 10.0);
        assert_eq!(json["predictions"][0]["confidence_upper"], 14.69);
    }
}
