use serde::{Deserialize, Serialize};

/// Upstream content stream connection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamConfig {
    /// Connect to the upstream stream at startup (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// NDJSON endpoint delivering one record per line
    #[serde(default)]
    pub url: String,

    /// Bearer token sent with the stream request
    pub bearer_token: Option<String>,

    /// Records buffered between the stream client and the ingestion job
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    #[serde(default = "default_backoff_min_secs")]
    pub backoff_min_secs: u64,

    #[serde(default = "default_backoff_max_secs")]
    pub backoff_max_secs: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            bearer_token: None,
            channel_capacity: default_channel_capacity(),
            backoff_min_secs: default_backoff_min_secs(),
            backoff_max_secs: default_backoff_max_secs(),
        }
    }
}

fn default_channel_capacity() -> usize {
    1024
}

fn default_backoff_min_secs() -> u64 {
    1
}

fn default_backoff_max_secs() -> u64 {
    64
}
