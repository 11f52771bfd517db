pub mod capacity_sweep;
pub mod ingestion;
pub mod runner;
pub mod tally_sweep;

pub use capacity_sweep::CapacitySweepJob;
pub use ingestion::IngestionJob;
pub use runner::JobRunner;
pub use tally_sweep::TallySweepJob;

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::error;

/// Runs one unit of job work, turning a panic into a logged error so the
/// job loop keeps going.
pub(crate) async fn run_guarded<F: Future>(job: &'static str, work: F) -> Option<F::Output> {
    match AssertUnwindSafe(work).catch_unwind().await {
        Ok(output) => Some(output),
        Err(_) => {
            error!(job, "Job run panicked; continuing with next run");
            None
        }
    }
}
