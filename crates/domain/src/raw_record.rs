//! Wire shape of a record delivered by the upstream content stream.
//!
//! Every nested block is optional so that an incomplete record still
//! deserializes and can be rejected by the ingestion filter instead of
//! failing the stream.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub data: Option<RawPost>,
    #[serde(default)]
    pub includes: Option<RawIncludes>,
    #[serde(default)]
    pub matching_rules: Vec<RawRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub entities: Option<RawEntities>,
    #[serde(default)]
    pub referenced_tweets: Vec<RawReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEntities {
    #[serde(default)]
    pub urls: Vec<RawUrl>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawUrl {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub expanded_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReference {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawIncludes {
    #[serde(default)]
    pub media: Vec<RawMedia>,
    #[serde(default)]
    pub users: Vec<RawUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMedia {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub media_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_image_url: String,
    /// RFC 3339 account creation timestamp, e.g. `2019-04-01T12:00:00.000Z`.
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRule {
    #[serde(default)]
    pub tag: String,
}

impl RawRecord {
    pub fn author(&self) -> Option<&RawUser> {
        self.includes.as_ref().and_then(|i| i.users.first())
    }

    pub fn first_media(&self) -> Option<&RawMedia> {
        self.includes.as_ref().and_then(|i| i.media.first())
    }

    pub fn rule_tag(&self) -> Option<&str> {
        self.matching_rules
            .iter()
            .map(|r| r.tag.as_str())
            .find(|tag| !tag.is_empty())
    }

    /// Expanded forms of every embedded link, falling back to the short URL.
    pub fn expanded_urls(&self) -> impl Iterator<Item = &str> {
        self.data
            .iter()
            .filter_map(|d| d.entities.as_ref())
            .flat_map(|e| e.urls.iter())
            .map(|u| u.expanded_url.as_deref().unwrap_or(u.url.as_str()))
    }
}
