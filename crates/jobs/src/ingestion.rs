use crate::run_guarded;
use chrono::Utc;
use memefeed_application::use_cases::{IngestOutcome, IngestRecordUseCase};
use memefeed_domain::RawRecord;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Drains the upstream record channel into the category stores.
///
/// Records are handled one at a time in arrival order. On cancellation the
/// record in flight is finished before the job exits; buffered records are
/// dropped.
pub struct IngestionJob {
    ingest: Arc<IngestRecordUseCase>,
    receiver: mpsc::Receiver<RawRecord>,
    shutdown: CancellationToken,
}

impl IngestionJob {
    pub fn new(ingest: Arc<IngestRecordUseCase>, receiver: mpsc::Receiver<RawRecord>) -> Self {
        Self {
            ingest,
            receiver,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(mut self) -> JoinHandle<()> {
        info!("Starting ingestion job");

        tokio::spawn(async move {
            let mut accepted: u64 = 0;
            let mut rejected: u64 = 0;
            let mut dropped: u64 = 0;

            loop {
                let record = tokio::select! {
                    biased;
                    _ = self.shutdown.cancelled() => {
                        info!(accepted, rejected, dropped, "IngestionJob: shutting down");
                        break;
                    }
                    next = self.receiver.recv() => match next {
                        Some(record) => record,
                        None => {
                            info!(accepted, rejected, dropped, "IngestionJob: channel closed");
                            break;
                        }
                    },
                };

                let outcome =
                    run_guarded("ingestion", self.ingest.execute(&record, Utc::now())).await;

                match outcome {
                    Some(Ok(IngestOutcome::Accepted { .. })) => accepted += 1,
                    Some(Ok(IngestOutcome::Rejected(_))) => rejected += 1,
                    Some(Ok(IngestOutcome::Dropped { .. })) => dropped += 1,
                    Some(Err(e)) => {
                        error!(
                            record_id = record.data.as_ref().map(|d| d.id.as_str()).unwrap_or(""),
                            error = %e,
                            "Failed to ingest record"
                        );
                    }
                    None => {}
                }
            }
        })
    }
}
