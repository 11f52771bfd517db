use super::{Backoff, NdjsonDecoder};
use memefeed_domain::config::StreamConfig;
use memefeed_domain::{DomainError, RawRecord};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// A silent connection is considered dead after this long.
const READ_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

enum Disconnect {
    Shutdown,
    ReceiverClosed,
    Lost(DomainError),
}

/// Long-lived HTTP connection to the upstream filtered stream.
///
/// Each newline-delimited JSON record is pushed into the ingestion channel.
/// Connection loss is logged and retried with exponential backoff until the
/// cancellation token fires or the receiving side goes away.
pub struct HttpRecordStream {
    client: reqwest::Client,
    url: String,
    bearer_token: Option<String>,
    backoff: Backoff,
}

impl HttpRecordStream {
    pub fn new(config: &StreamConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| DomainError::UpstreamUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            bearer_token: config.bearer_token.clone().filter(|t| !t.is_empty()),
            backoff: Backoff::new(
                Duration::from_secs(config.backoff_min_secs),
                Duration::from_secs(config.backoff_max_secs),
            ),
        })
    }

    pub async fn run(mut self, sender: mpsc::Sender<RawRecord>, shutdown: CancellationToken) {
        info!(url = %self.url, "Starting upstream stream client");

        loop {
            match self.stream_once(&sender, &shutdown).await {
                Disconnect::Shutdown => {
                    info!("Upstream stream client: shutting down");
                    return;
                }
                Disconnect::ReceiverClosed => {
                    warn!("Ingestion channel closed, stopping upstream stream client");
                    return;
                }
                Disconnect::Lost(e) => {
                    let delay = self.backoff.next_delay();
                    error!(
                        error = %e,
                        retry_in_secs = delay.as_secs(),
                        "Upstream stream unavailable"
                    );

                    tokio::select! {
                        _ = shutdown.cancelled() => {
                            info!("Upstream stream client: shutting down");
                            return;
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }
    }

    async fn stream_once(
        &mut self,
        sender: &mpsc::Sender<RawRecord>,
        shutdown: &CancellationToken,
    ) -> Disconnect {
        let mut request = self.client.get(&self.url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = tokio::select! {
            _ = shutdown.cancelled() => return Disconnect::Shutdown,
            result = request.send() => match result {
                Ok(response) => response,
                Err(e) => return Disconnect::Lost(DomainError::UpstreamUnavailable(e.to_string())),
            },
        };

        let status = response.status();
        if !status.is_success() {
            return Disconnect::Lost(DomainError::UpstreamUnavailable(format!(
                "upstream returned HTTP {}",
                status.as_u16()
            )));
        }

        info!("Connected to upstream stream");
        self.read_records(response, sender, shutdown).await
    }

    async fn read_records(
        &mut self,
        mut response: reqwest::Response,
        sender: &mpsc::Sender<RawRecord>,
        shutdown: &CancellationToken,
    ) -> Disconnect {
        let mut decoder = NdjsonDecoder::new();

        loop {
            let chunk = tokio::select! {
                _ = shutdown.cancelled() => return Disconnect::Shutdown,
                result = tokio::time::timeout(READ_IDLE_TIMEOUT, response.chunk()) => result,
            };

            let bytes = match chunk {
                Ok(Ok(Some(bytes))) => bytes,
                Ok(Ok(None)) => {
                    return Disconnect::Lost(DomainError::UpstreamUnavailable(
                        "stream closed by upstream".to_string(),
                    ))
                }
                Ok(Err(e)) => {
                    return Disconnect::Lost(DomainError::UpstreamUnavailable(e.to_string()))
                }
                Err(_) => {
                    return Disconnect::Lost(DomainError::UpstreamUnavailable(format!(
                        "no data for {}s",
                        READ_IDLE_TIMEOUT.as_secs()
                    )))
                }
            };

            // Any bytes, keep-alives included, prove the connection is healthy.
            self.backoff.reset();

            for decoded in decoder.push(&bytes) {
                let record = match decoded {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(error = %e, "Skipping malformed stream record");
                        continue;
                    }
                };

                debug!(
                    record_id = record.data.as_ref().map(|d| d.id.as_str()).unwrap_or(""),
                    "Stream record received"
                );
                if sender.send(record).await.is_err() {
                    return Disconnect::ReceiverClosed;
                }
            }
        }
    }
}
