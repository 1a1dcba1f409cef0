//! Service level to z-score lookup.

use tracing::warn;

/// `(service_level, z)` pairs, ascending by service level.
pub const Z_SCORE_TABLE: &[(f64, f64)] = &[
    (0.50, 0.00),
    (0.80, 0.84),
    (0.85, 1.04),
    (0.90, 1.28),
    (0.95, 1.65),
    (0.97, 1.88),
    (0.98, 2.05),
    (0.99, 2.33),
];

/// z used when the service level is outside the table (the 95% entry).
pub const DEFAULT_Z_SCORE: f64 = 1.65;

/// z-score for `service_level`, linearly interpolated between table entries.
///
/// Levels outside `[0.50, 0.99]` (or NaN) resolve to [`DEFAULT_Z_SCORE`] with a
/// warning instead of an error.
pub fn z_score(service_level: f64) -> f64 {
    if let Some(&(_, z)) = Z_SCORE_TABLE.iter().find(|(level, _)| *level == service_level) {
        return z;
    }

    for pair in Z_SCORE_TABLE.windows(2) {
        let (lo, z_lo) = pair[0];
        let (hi, z_hi) = pair[1];
        if lo <= service_level && service_level <= hi {
            let ratio = (service_level - lo) / (hi - lo);
            return z_lo + ratio * (z_hi - z_lo);
        }
    }

    warn!(
        service_level,
        default_z = DEFAULT_Z_SCORE,
        "service level outside z-score table; using the 95% default"
    );
    DEFAULT_Z_SCORE
}
