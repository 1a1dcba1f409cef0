//! Calendar feature engineering shared by fitting and prediction.
//!
//! Layout of a [`FeatureVector`]:
//! `[trend, dow_sin, dow_cos, month_sin, month_cos, day_of_year]`.

use std::f64::consts::TAU;

use chrono::{Datelike, NaiveDate};

pub const FEATURE_COUNT: usize = 6;

pub type FeatureVector = [f64; FEATURE_COUNT];

/// Build the feature vector for `date`, with the trend measured in days from `base_date`.
///
/// Weekday runs Monday = 0 through Sunday = 6. Weekday and month are encoded on
/// the unit circle so Sunday sits next to Monday and December next to January.
pub fn calendar_features(date: NaiveDate, base_date: NaiveDate) -> FeatureVector {
    let trend = (date - base_date).num_days() as f64;
    let (dow_sin, dow_cos) = cyclic(f64::from(date.weekday().num_days_from_monday()), 7.0);
    let (month_sin, month_cos) = cyclic(f64::from(date.month()), 12.0);
    let day_of_year = f64::from(date.ordinal());

    [trend, dow_sin, dow_cos, month_sin, month_cos, day_of_year]
}

pub fn design_matrix(dates: &[NaiveDate], base_date: NaiveDate) -> Vec<FeatureVector> {
    dates
        .iter()
        .map(|d| calendar_features(*d, base_date))
        .collect()
}

fn cyclic(value: f64, period: f64) -> (f64, f64) {
    let angle = TAU * value / period;
    (angle.sin(), angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn trend_counts_days_from_base() {
        let base = ymd(2024, 2, 27);
        assert_eq!(calendar_features(base, base)[0], 0.0);
        // 2024 is a leap year: Feb 27 -> Mar 1 spans three days.
        assert_eq!(calendar_features(ymd(2024, 3, 1), base)[0], 3.0);
        assert_eq!(calendar_features(ymd(2024, 2, 20), base)[0], -7.0);
    }

    #[test]
    fn monday_encodes_to_angle_zero() {
        // 2024-03-04 is a Monday.
        let f = calendar_features(ymd(2024, 3, 4), ymd(2024, 3, 4));
        assert!(f[1].abs() < 1e-12);
        assert!((f[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn weekday_encoding_repeats_weekly() {
        let base = ymd(2024, 1, 1);
        let a = calendar_features(ymd(2024, 5, 8), base);
        let b = calendar_features(ymd(2024, 5, 15), base);
        assert!((a[1] - b[1]).abs() < 1e-12);
        assert!((a[2] - b[2]).abs() < 1e-12);
        assert_eq!(b[0] - a[0], 7.0);
    }

    #[test]
    fn december_encodes_to_full_circle() {
        let f = calendar_features(ymd(2023, 12, 31), ymd(2023, 1, 1));
        assert!(f[3].abs() < 1e-12);
        assert!((f[4] - 1.0).abs() < 1e-12);
        assert_eq!(f[5], 365.0);
    }

    #[test]
    fn design_matrix_has_one_row_per_date() {
        let base = ymd(2024, 1, 1);
        let rows = design_matrix(&[base, ymd(2024, 1, 2), ymd(2024, 1, 3)], base);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2][0], 2.0);
        assert_eq!(rows[2][5], 3.0);
    }
}
