use stockcast_core::ProductId;

use crate::job::AiJob;
use crate::model::{ReorderRequest, ReorderSuggestion};
use crate::reorder::ReorderOptimizer;
use crate::result::AiError;

/// Replenishment job: a single [`ReorderOptimizer::optimize`] call.
///
/// Range checks belong to the caller (see [`ReorderRequest::validate`]);
/// out-of-range values degrade to the optimizer's defaults.
#[derive(Debug, Clone)]
pub struct ReorderSuggestionJob {
    input: ReorderRequest,
    optimizer: ReorderOptimizer,
}

impl ReorderSuggestionJob {
    pub fn new(input: ReorderRequest) -> Self {
        Self {
            input,
            optimizer: ReorderOptimizer::new(),
        }
    }
}

impl AiJob for ReorderSuggestionJob {
    type Input = ReorderRequest;
    type Output = ReorderSuggestion;

    fn product_id(&self) -> ProductId {
        self.input.product_id
    }

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn run(&self) -> Result<ReorderSuggestion, AiError> {
        Ok(self.optimizer.optimize(&self.input))
    }
}
