use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ingestion filter thresholds and category routing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Minimum author account age in days (default: 10)
    #[serde(default = "default_min_account_age_days")]
    pub min_account_age_days: u32,

    /// Media types an accepted record must carry (default: ["photo"])
    #[serde(default = "default_accepted_media_types")]
    pub accepted_media_types: Vec<String>,

    /// Text prefix marking a repost (default: "RT ")
    #[serde(default = "default_repost_prefix")]
    pub repost_prefix: String,

    /// Base used to build `content_link` (default: "https://twitter.com")
    #[serde(default = "default_link_base")]
    pub link_base: String,

    /// `source` label stamped on ingested items
    #[serde(default = "default_source_label")]
    pub source_label: String,

    /// Category for records whose rule tag is not routed (default: "main")
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Upstream rule tag -> category name
    #[serde(default)]
    pub rule_categories: BTreeMap<String, String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_account_age_days: default_min_account_age_days(),
            accepted_media_types: default_accepted_media_types(),
            repost_prefix: default_repost_prefix(),
            link_base: default_link_base(),
            source_label: default_source_label(),
            default_category: default_category(),
            rule_categories: BTreeMap::new(),
        }
    }
}

fn default_min_account_age_days() -> u32 {
    10
}

fn default_accepted_media_types() -> Vec<String> {
    vec!["photo".to_string()]
}

fn default_repost_prefix() -> String {
    "RT ".to_string()
}

fn default_link_base() -> String {
    "https://twitter.com".to_string()
}

fn default_source_label() -> String {
    "Recently uploaded".to_string()
}

fn default_category() -> String {
    "main".to_string()
}
