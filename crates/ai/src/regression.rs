//! Ordinary least squares over calendar features.

use nalgebra::{DMatrix, DVector};

use crate::features::{FEATURE_COUNT, FeatureVector};
use crate::result::AiError;

const SVD_EPSILON: f64 = 5.0 * f64::EPSILON;
const SVD_MAX_ITERATIONS: usize = 10_000;
/// Singular values below this fraction of the largest one count as zero.
const RANK_TOLERANCE: f64 = 1e-10;

/// Fitted linear model `y = intercept + coefficients · x`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    intercept: f64,
    coefficients: FeatureVector,
}

impl LinearModel {
    /// Least-squares fit with an intercept.
    ///
    /// Features and targets are centered, then solved through the SVD
    /// pseudo-inverse. Collinear columns (trend vs day-of-year inside one year,
    /// constant month features inside one month) get the minimum-norm split
    /// instead of failing.
    pub fn fit(rows: &[FeatureVector], targets: &[f64]) -> Result<Self, AiError> {
        if rows.is_empty() {
            return Err(AiError::InvalidInput("cannot fit a model on zero rows".to_string()));
        }
        if rows.len() != targets.len() {
            return Err(AiError::InvalidInput(format!(
                "feature rows ({}) and targets ({}) differ in length",
                rows.len(),
                targets.len()
            )));
        }

        let n = rows.len();
        let mut feature_means = [0.0; FEATURE_COUNT];
        for row in rows {
            for (mean, x) in feature_means.iter_mut().zip(row) {
                *mean += x;
            }
        }
        for mean in &mut feature_means {
            *mean /= n as f64;
        }
        let target_mean = targets.iter().sum::<f64>() / n as f64;

        let x = DMatrix::from_fn(n, FEATURE_COUNT, |r, c| rows[r][c] - feature_means[c]);
        let y = DVector::from_fn(n, |r, _| targets[r] - target_mean);

        let svd = x
            .try_svd(true, true, SVD_EPSILON, SVD_MAX_ITERATIONS)
            .ok_or_else(|| AiError::InferenceFailed("SVD did not converge".to_string()))?;

        let cutoff = svd.singular_values.max() * RANK_TOLERANCE;
        let beta = svd
            .solve(&y, cutoff)
            .map_err(|e| AiError::InferenceFailed(e.to_string()))?;

        let mut coefficients = [0.0; FEATURE_COUNT];
        for (c, b) in coefficients.iter_mut().zip(beta.iter()) {
            *c = *b;
        }
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AiError::InferenceFailed(
                "least-squares solution is not finite".to_string(),
            ));
        }

        let intercept = target_mean
            - feature_means
                .iter()
                .zip(&coefficients)
                .map(|(m, c)| m * c)
                .sum::<f64>();

        Ok(Self {
            intercept,
            coefficients,
        })
    }

    pub fn predict(&self, features: &FeatureVector) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &FeatureVector {
        &self.coefficients
    }
}
