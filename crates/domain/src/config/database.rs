use serde::{Deserialize, Serialize};

/// SQLite persistence for items, moderation records, blocklist and tallies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file (default: "./memefeed.db")
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum pooled connections (default: 8)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_db_path() -> String {
    "./memefeed.db".to_string()
}

fn default_max_connections() -> u32 {
    8
}
