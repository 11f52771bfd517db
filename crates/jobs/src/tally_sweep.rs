use crate::run_guarded;
use chrono::Utc;
use memefeed_application::use_cases::TallySweepUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub struct TallySweepJob {
    sweep: Arc<TallySweepUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl TallySweepJob {
    pub fn new(sweep: Arc<TallySweepUseCase>) -> Self {
        Self {
            sweep,
            interval_secs: 1800,
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
        info!(interval_secs = self.interval_secs, "Starting tally sweep job");

        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(self.interval_secs.max(1)));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("TallySweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let Some(report) = run_guarded("tally_sweep", self.sweep.execute(Utc::now())).await else {
                            continue;
                        };
                        if report.failures > 0 {
                            warn!(
                                purged = report.purged,
                                credited = report.credited,
                                failures = report.failures,
                                "Tally sweep completed with failures"
                            );
                        } else {
                            info!(
                                purged = report.purged,
                                credited = report.credited,
                                "Tally sweep completed"
                            );
                        }
                    }
                }
            }
        })
    }
}
