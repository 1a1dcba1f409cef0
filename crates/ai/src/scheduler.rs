use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::info_span;

use crate::job::AiJob;
use crate::result::AiError;

/// Scheduler/executor for AI jobs.
///
/// Jobs are CPU-bound and synchronous, so async callers should hand the
/// scheduler to a blocking pool.
pub trait AiScheduler: Send + Sync + 'static {
    fn run<J: AiJob>(&self, job: J) -> Result<J::Output, AiError> {
        run_in_span(&job)
    }

    /// Run independent jobs, returning results in input order.
    fn run_batch<J: AiJob>(&self, jobs: Vec<J>) -> Vec<Result<J::Output, AiError>>;
}

/// In-process scheduler backed by a dedicated rayon pool.
///
/// Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct LocalAiScheduler {
    pool: Arc<ThreadPool>,
}

impl LocalAiScheduler {
    pub fn new(workers: NonZeroUsize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.get())
            .thread_name(|i| format!("ai-worker-{i}"))
            .build()?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// One worker per available CPU (falls back to a single worker).
    pub fn with_available_parallelism() -> Result<Self, ThreadPoolBuildError> {
        Self::new(thread::available_parallelism().unwrap_or(NonZeroUsize::MIN))
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl AiScheduler for LocalAiScheduler {
    fn run_batch<J: AiJob>(&self, jobs: Vec<J>) -> Vec<Result<J::Output, AiError>> {
        self.pool
            .install(|| jobs.par_iter().map(run_isolated).collect())
    }
}

fn run_in_span<J: AiJob>(job: &J) -> Result<J::Output, AiError> {
    let span = info_span!("ai_job", product_id = %job.product_id());
    let _entered = span.enter();
    job.run()
}

/// A panicking job fails alone instead of unwinding through the whole batch.
fn run_isolated<J: AiJob>(job: &J) -> Result<J::Output, AiError> {
    panic::catch_unwind(AssertUnwindSafe(|| run_in_span(job))).unwrap_or_else(|_| {
        Err(AiError::InferenceFailed(format!(
            "job for product {} panicked",
            job.product_id()
        )))
    })
}
