use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlocklistField {
    Keyword,
    User,
    Url,
}

impl BlocklistField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlocklistField::Keyword => "keyword",
            BlocklistField::User => "user",
            BlocklistField::Url => "url",
        }
    }

    pub fn all() -> &'static [BlocklistField] {
        &[BlocklistField::Keyword, BlocklistField::User, BlocklistField::Url]
    }
}

impl fmt::Display for BlocklistField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlocklistField {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "keyword" => Ok(Self::Keyword),
            "user" => Ok(Self::User),
            "url" => Ok(Self::Url),
            other => Err(DomainError::Serialization(format!(
                "unknown blocklist field '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlocklistAction {
    #[default]
    Add,
    Remove,
}

/// The three banned sets. Values are stored lowercased so every membership
/// check is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlocklistSnapshot {
    pub keywords: BTreeSet<String>,
    pub users: BTreeSet<String>,
    pub urls: BTreeSet<String>,
}

impl BlocklistSnapshot {
    pub fn normalize(value: &str) -> String {
        value.trim().to_lowercase()
    }

    pub fn set(&self, field: BlocklistField) -> &BTreeSet<String> {
        match field {
            BlocklistField::Keyword => &self.keywords,
            BlocklistField::User => &self.users,
            BlocklistField::Url => &self.urls,
        }
    }

    fn set_mut(&mut self, field: BlocklistField) -> &mut BTreeSet<String> {
        match field {
            BlocklistField::Keyword => &mut self.keywords,
            BlocklistField::User => &mut self.users,
            BlocklistField::Url => &mut self.urls,
        }
    }

    /// Applies one mutation. Returns `false` when it had no effect (adding a
    /// present member, removing an absent one, or an empty value).
    pub fn apply(&mut self, action: BlocklistAction, field: BlocklistField, value: &str) -> bool {
        let value = match field {
            BlocklistField::User => Self::normalize(value.trim().trim_start_matches('@')),
            _ => Self::normalize(value),
        };
        if value.is_empty() {
            return false;
        }

        let set = self.set_mut(field);
        match action {
            BlocklistAction::Add => set.insert(value),
            BlocklistAction::Remove => set.remove(&value),
        }
    }

    pub fn matches_keyword(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }

    pub fn matches_user(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|c| {
            let c = Self::normalize(c.trim_start_matches('@'));
            !c.is_empty() && self.users.contains(&c)
        })
    }

    pub fn matches_url(&self, url: &str) -> bool {
        let url = url.to_lowercase();
        self.urls.iter().any(|u| url.contains(u.as_str()))
    }

    pub fn len(&self) -> usize {
        self.keywords.len() + self.users.len() + self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
