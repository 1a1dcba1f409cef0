use stockcast_ai::{AiError, AiJob, AiScheduler, LocalAiScheduler};

/// Shared handler state.
///
/// Jobs are CPU-bound, so they run on tokio's blocking pool rather than on
/// the async workers.
#[derive(Debug, Clone)]
pub struct AppServices {
    scheduler: LocalAiScheduler,
}

impl AppServices {
    pub fn new(scheduler: LocalAiScheduler) -> Self {
        Self { scheduler }
    }

    pub async fn run<J: AiJob>(&self, job: J) -> Result<J::Output, AiError> {
        let scheduler = self.scheduler.clone();
        tokio::task::spawn_blocking(move || scheduler.run(job))
            .await
            .map_err(|e| AiError::InferenceFailed(format!("job task failed: {e}")))?
    }

    pub async fn run_batch<J: AiJob>(
        &self,
        jobs: Vec<J>,
    ) -> Result<Vec<Result<J::Output, AiError>>, AiError> {
        let scheduler = self.scheduler.clone();
        tokio::task::spawn_blocking(move || scheduler.run_batch(jobs))
            .await
            .map_err(|e| AiError::InferenceFailed(format!("batch task failed: {e}")))
    }
}
