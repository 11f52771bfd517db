use memefeed_domain::config::StreamConfig;
use memefeed_domain::RawRecord;
use memefeed_infrastructure::stream::HttpRecordStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Spawns the upstream client feeding `sender`.
pub fn start_stream(
    config: &StreamConfig,
    sender: mpsc::Sender<RawRecord>,
    shutdown: CancellationToken,
) -> anyhow::Result<JoinHandle<()>> {
    let client = HttpRecordStream::new(config)?;
    Ok(tokio::spawn(client.run(sender, shutdown)))
}
