//! `stockcast-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the forecasting
//! core and the request layer (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use value_object::ValueObject;
