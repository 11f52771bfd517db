use serde::{Deserialize, Serialize};

/// Per-operation TTLs of the query cache, in seconds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_list_ttl")]
    pub list_ttl_secs: u64,

    #[serde(default = "default_short_ttl")]
    pub profile_ttl_secs: u64,

    #[serde(default = "default_short_ttl")]
    pub item_ttl_secs: u64,

    #[serde(default = "default_removed_ttl")]
    pub removed_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            list_ttl_secs: default_list_ttl(),
            profile_ttl_secs: default_short_ttl(),
            item_ttl_secs: default_short_ttl(),
            removed_ttl_secs: default_removed_ttl(),
        }
    }
}

fn default_list_ttl() -> u64 {
    90
}

fn default_short_ttl() -> u64 {
    60
}

fn default_removed_ttl() -> u64 {
    30
}
