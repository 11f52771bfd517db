use memefeed_domain::{Item, Page};
use serde::{Deserialize, Serialize};

/// `?offset=&limit=` on every listing. Absent values fall back to the first
/// page at the default page size.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: String,
    pub author_id: String,
    pub username: String,
    pub display_name: String,
    pub profile_image_url: String,
    pub text: String,
    pub created_at: Option<String>,
    pub content_link: String,
    pub media_url: String,
    pub source: String,
    pub category: String,
    pub status: String,
    pub removed_by: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.to_string(),
            author_id: item.author_id.to_string(),
            username: item.username.to_string(),
            display_name: item.display_name,
            profile_image_url: item.profile_image_url,
            text: item.text,
            created_at: item.created_at.map(|t| t.to_rfc3339()),
            content_link: item.content_link,
            media_url: item.media_url,
            source: item.source,
            category: item.category.to_string(),
            status: item.status.to_string(),
            removed_by: item.removed_by.map(|m| m.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    pub items: Vec<ItemResponse>,
    pub total: usize,
    pub next_offset: Option<usize>,
}

impl From<Page<Item>> for PageResponse {
    fn from(page: Page<Item>) -> Self {
        Self {
            items: page.items.into_iter().map(ItemResponse::from).collect(),
            total: page.total,
            next_offset: page.next_offset,
        }
    }
}
