//! Value object trait: equality by value, not identity.
//!
//! Demand observations, forecast points and reorder suggestions are all values:
//! they carry no identity of their own and are never mutated after creation.

/// Marker trait for value objects.
///
/// Implementors are **immutable** and **compared by value**. Two observations
/// with the same date and quantity are the same observation, so they can be
/// freely cloned across worker threads and compared in tests.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct HistoricalDataPoint {
///     date: NaiveDate,
///     quantity: f64,
/// }
///
/// impl ValueObject for HistoricalDataPoint {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
