use memefeed_domain::{Category, DomainError, Item, ItemStatus};
use serde::Deserialize;
use std::sync::Arc;

const UPLOAD_SOURCE: &str = "Uploaded";

/// Manually submitted item. Only the id, handle, media link and category are
/// required; status is always forced to active by the upload path.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadRequest {
    pub id: String,
    pub username: String,
    pub media_url: String,
    pub category: String,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub profile_image_url: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub content_link: String,
    #[serde(default)]
    pub source: Option<String>,
}

impl UploadRequest {
    pub fn into_item(self) -> Result<Item, DomainError> {
        let category = Category::new(&self.category)?;
        let username = self.username.trim().trim_start_matches('@').to_string();

        Ok(Item {
            id: Arc::from(self.id.trim()),
            author_id: Arc::from(self.author_id.as_deref().unwrap_or(&username)),
            display_name: self.display_name.unwrap_or_else(|| username.clone()),
            username: Arc::from(username.as_str()),
            profile_image_url: self.profile_image_url,
            text: self.text,
            created_at: None,
            content_link: self.content_link,
            media_url: self.media_url.trim().to_string(),
            source: self.source.unwrap_or_else(|| UPLOAD_SOURCE.to_string()),
            category,
            status: ItemStatus::Active,
            removed_by: None,
        })
    }
}
