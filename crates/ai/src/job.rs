use stockcast_core::ProductId;

use crate::result::AiError;

/// A product-scoped inference unit.
///
/// Jobs own their input snapshot and build any model state they need inside
/// `run`, so independent jobs can execute on separate threads.
pub trait AiJob: Send + Sync + 'static {
    type Input: Send + Sync + 'static;
    type Output: Send + 'static;

    /// The product this job computes for.
    fn product_id(&self) -> ProductId;

    /// The input snapshot the job will run inference on.
    fn input(&self) -> &Self::Input;

    /// Execute inference.
    ///
    /// Must not touch shared mutable state.
    fn run(&self) -> Result<Self::Output, AiError>;
}
