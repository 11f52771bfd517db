use crate::{CapacitySweepJob, IngestionJob, TallySweepJob};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// let handles = JobRunner::new()
///     .with_ingestion(IngestionJob::new(ingest, receiver))
///     .with_capacity_sweep(CapacitySweepJob::new(capacity).with_interval(120))
///     .with_tally_sweep(TallySweepJob::new(tally).with_interval(1800))
///     .start()
///     .await;
/// ```
pub struct JobRunner {
    ingestion: Option<IngestionJob>,
    capacity_sweep: Option<CapacitySweepJob>,
    tally_sweep: Option<TallySweepJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            ingestion: None,
            capacity_sweep: None,
            tally_sweep: None,
        }
    }

    pub fn with_ingestion(mut self, job: IngestionJob) -> Self {
        self.ingestion = Some(job);
        self
    }

    pub fn with_capacity_sweep(mut self, job: CapacitySweepJob) -> Self {
        self.capacity_sweep = Some(job);
        self
    }

    pub fn with_tally_sweep(mut self, job: TallySweepJob) -> Self {
        self.tally_sweep = Some(job);
        self
    }

    /// Start all registered background jobs. The handles complete once each
    /// job has observed its cancellation token.
    pub async fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");
        let mut handles = Vec::new();

        if let Some(job) = self.ingestion {
            handles.push(job.start().await);
        }

        if let Some(job) = self.capacity_sweep {
            handles.push(Arc::new(job).start().await);
        }

        if let Some(job) = self.tally_sweep {
            handles.push(Arc::new(job).start().await);
        }

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
