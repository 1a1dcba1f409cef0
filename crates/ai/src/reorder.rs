//! Replenishment parameters: safety stock, reorder point, EOQ (Wilson) and savings.

use tracing::{debug, warn};

use crate::model::{ReorderRequest, ReorderSuggestion};
use crate::z_score::z_score;

const DAYS_PER_YEAR: f64 = 365.0;
const BASELINE_ORDERS_PER_YEAR: f64 = 12.0;

/// Stateless optimizer; every method is a pure function of its arguments.
#[derive(Debug, Copy, Clone, Default)]
pub struct ReorderOptimizer;

impl ReorderOptimizer {
    pub fn new() -> Self {
        Self
    }

    /// See [`crate::z_score::z_score`].
    pub fn z_score(&self, service_level: f64) -> f64 {
        z_score(service_level)
    }

    /// `ceil(z * σ_demand * sqrt(lead_time))`, never negative.
    pub fn calculate_safety_stock(
        &self,
        demand_std_dev: f64,
        lead_time_days: u32,
        service_level: f64,
    ) -> i64 {
        let z = self.z_score(service_level);
        let raw = z * demand_std_dev * f64::from(lead_time_days).sqrt();
        (raw.ceil() as i64).max(0)
    }

    /// Expected consumption over the lead time plus the safety buffer.
    pub fn calculate_reorder_point(
        &self,
        average_daily_demand: f64,
        lead_time_days: u32,
        safety_stock: i64,
    ) -> i64 {
        (average_daily_demand * f64::from(lead_time_days) + safety_stock as f64).ceil() as i64
    }

    /// Wilson EOQ `ceil(sqrt(2DS/H))`, at least 1.
    ///
    /// Non-positive holding cost or demand has no meaningful optimum and yields 1.
    pub fn calculate_eoq(
        &self,
        annual_demand: f64,
        ordering_cost: f64,
        holding_cost_per_unit: f64,
    ) -> i64 {
        if holding_cost_per_unit <= 0.0 || annual_demand <= 0.0 {
            warn!(
                annual_demand,
                holding_cost_per_unit, "degenerate EOQ inputs; using order quantity of 1"
            );
            return 1;
        }

        let eoq = (2.0 * annual_demand * ordering_cost / holding_cost_per_unit).sqrt();
        (eoq.ceil() as i64).max(1)
    }

    /// Annual cost saved by ordering `eoq` units instead of a month's demand 12 times a year.
    ///
    /// Clamped at 0: a policy that happens to cost more reports no savings.
    pub fn estimate_annual_savings(
        &self,
        annual_demand: f64,
        ordering_cost: f64,
        holding_cost_per_unit: f64,
        eoq: i64,
    ) -> f64 {
        // Total cost model: ordering_cost * orders_per_year + holding_cost * average_stock.
        let monthly_order_qty = annual_demand / BASELINE_ORDERS_PER_YEAR;
        let baseline = ordering_cost * BASELINE_ORDERS_PER_YEAR
            + holding_cost_per_unit * (monthly_order_qty / 2.0);

        let order_qty = eoq.max(1) as f64;
        let optimized =
            ordering_cost * (annual_demand / order_qty) + holding_cost_per_unit * (order_qty / 2.0);

        let savings = baseline - optimized;
        if savings < 0.0 {
            warn!(
                baseline,
                optimized, "EOQ policy costs more than monthly ordering; reporting zero savings"
            );
        }
        savings.max(0.0)
    }

    /// Compute the full suggestion for one product.
    pub fn optimize(&self, request: &ReorderRequest) -> ReorderSuggestion {
        let annual_demand = request.average_daily_demand * DAYS_PER_YEAR;

        let safety_stock = self.calculate_safety_stock(
            request.demand_std_dev,
            request.lead_time_days,
            request.service_level,
        );
        let reorder_point = self.calculate_reorder_point(
            request.average_daily_demand,
            request.lead_time_days,
            safety_stock,
        );
        let eoq = self.calculate_eoq(
            annual_demand,
            request.ordering_cost,
            request.holding_cost_per_unit,
        );
        let estimated_annual_savings = self.estimate_annual_savings(
            annual_demand,
            request.ordering_cost,
            request.holding_cost_per_unit,
            eoq,
        );

        debug!(
            product_id = %request.product_id,
            safety_stock,
            reorder_point,
            eoq,
            estimated_annual_savings,
            "reorder parameters computed"
        );

        ReorderSuggestion {
            product_id: request.product_id,
            reorder_point,
            reorder_quantity: eoq,
            safety_stock,
            economic_order_quantity: eoq,
            estimated_annual_savings,
        }
    }
}
