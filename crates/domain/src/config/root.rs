use super::{
    CacheConfig, ConfigError, DatabaseConfig, FilterConfig, JobsConfig, LoggingConfig,
    ModerationConfig, ServerConfig, StoreConfig, StreamConfig,
};
use crate::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "memefeed.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub stream: StreamConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub moderation: ModerationConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub jobs: JobsConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line; each one wins over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub web_port: Option<u16>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
    pub stream_url: Option<String>,
    pub disable_stream: bool,
}

impl Config {
    /// Load from `path`, or from `memefeed.toml` in the working directory when
    /// present, or fall back to defaults. CLI overrides are applied last.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(path) = overrides.database_path {
            self.database.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(url) = overrides.stream_url {
            self.stream.url = url;
            self.stream.enabled = true;
        }
        if overrides.disable_stream {
            self.stream.enabled = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.categories.is_empty() {
            return Err(ConfigError::Validation(
                "at least one category must be configured".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for category in &self.store.categories {
            let name = Category::new(&category.name)
                .map_err(|e| ConfigError::Validation(e.to_string()))?;

            if category.capacity == 0 {
                return Err(ConfigError::Validation(format!(
                    "category '{}' must have a non-zero capacity",
                    name
                )));
            }

            if !names.insert(name.clone()) {
                return Err(ConfigError::Validation(format!(
                    "category '{}' is configured more than once",
                    name
                )));
            }
        }

        let routed = std::iter::once(&self.filter.default_category)
            .chain(self.filter.rule_categories.values());
        for target in routed {
            let target = Category::new(target)
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
            if !names.contains(&target) {
                return Err(ConfigError::Validation(format!(
                    "filter routes to unknown category '{}'",
                    target
                )));
            }
        }

        let ttls = [
            ("cache.list_ttl_secs", self.cache.list_ttl_secs),
            ("cache.profile_ttl_secs", self.cache.profile_ttl_secs),
            ("cache.item_ttl_secs", self.cache.item_ttl_secs),
            ("cache.removed_ttl_secs", self.cache.removed_ttl_secs),
            (
                "jobs.capacity_sweep_interval_secs",
                self.jobs.capacity_sweep_interval_secs,
            ),
            (
                "jobs.tally_sweep_interval_secs",
                self.jobs.tally_sweep_interval_secs,
            ),
            (
                "moderation.removal_retention_secs",
                self.moderation.removal_retention_secs,
            ),
        ];
        if let Some((name, _)) = ttls.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::Validation(format!("{} must be non-zero", name)));
        }

        if self.moderation.removal_retention_secs > ModerationConfig::MAX_RETENTION_SECS {
            return Err(ConfigError::Validation(format!(
                "moderation.removal_retention_secs cannot exceed {}",
                ModerationConfig::MAX_RETENTION_SECS
            )));
        }

        if self.stream.enabled && self.stream.url.is_empty() {
            return Err(ConfigError::Validation(
                "stream.url is required when the stream is enabled".to_string(),
            ));
        }

        if self.stream.channel_capacity == 0 {
            return Err(ConfigError::Validation(
                "stream.channel_capacity must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}
