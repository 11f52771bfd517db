use crate::{Category, DomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Active,
    Removed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Removed => "removed",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "removed" => Ok(Self::Removed),
            other => Err(DomainError::Serialization(format!(
                "unknown item status '{}'",
                other
            ))),
        }
    }
}

/// A single accepted content record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Arc<str>,
    pub author_id: Arc<str>,
    pub username: Arc<str>,
    pub display_name: String,
    pub profile_image_url: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub content_link: String,
    pub media_url: String,
    pub source: String,
    pub category: Category,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_by: Option<Arc<str>>,
}

impl Item {
    pub const MAX_TEXT_LEN: usize = 4_000;

    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }

    pub fn is_authored_by(&self, handle: &str) -> bool {
        self.username.eq_ignore_ascii_case(handle.trim_start_matches('@'))
    }

    /// Checks the fields a manually submitted item must carry.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::InvalidItem("id cannot be empty".to_string()));
        }

        if self.username.trim().is_empty() {
            return Err(DomainError::InvalidItem(
                "username cannot be empty".to_string(),
            ));
        }

        if self.media_url.trim().is_empty() {
            return Err(DomainError::InvalidItem(
                "media_url cannot be empty".to_string(),
            ));
        }

        if self.text.len() > Self::MAX_TEXT_LEN {
            return Err(DomainError::InvalidItem(format!(
                "text cannot exceed {} bytes",
                Self::MAX_TEXT_LEN
            )));
        }

        Ok(())
    }
}
