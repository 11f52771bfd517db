use crate::run_guarded;
use memefeed_application::use_cases::CapacitySweepUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct CapacitySweepJob {
    sweep: Arc<CapacitySweepUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CapacitySweepJob {
    pub fn new(sweep: Arc<CapacitySweepUseCase>) -> Self {
        Self {
            sweep,
            interval_secs: 120,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval_secs,
            "Starting capacity sweep job"
        );

        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(self.interval_secs.max(1)));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CapacitySweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let Some(report) = run_guarded("capacity_sweep", self.sweep.execute()).await else {
                            continue;
                        };
                        if !report.failed_categories.is_empty() {
                            warn!(
                                failed = ?report.failed_categories,
                                "Capacity sweep completed with failures"
                            );
                        } else if report.evicted > 0 || report.deleted > 0 {
                            info!(
                                evicted = report.evicted,
                                deleted = report.deleted,
                                "Capacity sweep completed"
                            );
                        } else {
                            debug!("Capacity sweep found nothing to trim");
                        }
                    }
                }
            }
        })
    }
}
