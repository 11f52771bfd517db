use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Named partition of the item store, e.g. `main` or `community`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(Arc<str>);

impl Category {
    pub const MAX_LEN: usize = 64;

    pub fn new(name: &str) -> Result<Self, DomainError> {
        let name = name.trim().to_ascii_lowercase();

        if name.is_empty() {
            return Err(DomainError::InvalidCategory(
                "Category name cannot be empty".to_string(),
            ));
        }

        if name.len() > Self::MAX_LEN {
            return Err(DomainError::InvalidCategory(format!(
                "Category name cannot exceed {} characters",
                Self::MAX_LEN
            )));
        }

        let valid_chars = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid_chars {
            return Err(DomainError::InvalidCategory(format!(
                "'{}' may only contain alphanumeric characters, hyphens, and underscores",
                name
            )));
        }

        Ok(Self(Arc::from(name.as_str())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Category {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0.to_string()
    }
}

/// Which end of a category receives new items. Eviction always happens at
/// the opposite end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertPolicy {
    /// Oldest first: new items go to the back, eviction pops the front.
    #[default]
    Append,
    /// Newest first: new items go to the front, eviction pops the back.
    Prepend,
}
