#![allow(dead_code)]

mod mock_repositories;

pub use mock_repositories::*;

use chrono::{DateTime, Duration, Utc};
use memefeed_application::services::{
    BlocklistManager, BoundedCategoryStore, CacheTtls, FeedCache, IngestionFilter,
    ModerationLedger, ModeratorTally,
};
use memefeed_domain::config::{CacheConfig, FilterConfig};
use memefeed_domain::raw_record::{RawIncludes, RawMedia, RawPost, RawUser};
use memefeed_domain::{Category, InsertPolicy, Item, ItemStatus, RawRecord};
use std::sync::Arc;

pub fn category(name: &str) -> Category {
    Category::new(name).unwrap()
}

pub fn make_item(id: &str, category_name: &str) -> Item {
    Item {
        id: Arc::from(id),
        author_id: Arc::from("42"),
        username: Arc::from("poster"),
        display_name: "Poster".to_string(),
        profile_image_url: String::new(),
        text: format!("meme {}", id),
        created_at: None,
        content_link: String::new(),
        media_url: format!("https://img.example/{}.jpg", id),
        source: "Recently uploaded".to_string(),
        category: category(category_name),
        status: ItemStatus::Active,
        removed_by: None,
    }
}

pub fn make_raw_record(id: &str, now: DateTime<Utc>) -> RawRecord {
    RawRecord {
        data: Some(RawPost {
            id: id.to_string(),
            text: "fresh meme".to_string(),
            entities: None,
            referenced_tweets: Vec::new(),
        }),
        includes: Some(RawIncludes {
            media: vec![RawMedia {
                kind: "photo".to_string(),
                url: Some(format!("https://img.example/{}.jpg", id)),
                media_key: String::new(),
            }],
            users: vec![RawUser {
                id: "42".to_string(),
                username: "poster".to_string(),
                name: "Poster".to_string(),
                profile_image_url: String::new(),
                created_at: Some((now - Duration::days(400)).to_rfc3339()),
            }],
        }),
        matching_rules: Vec::new(),
    }
}

/// In-memory services shared by the jobs under test.
pub struct Services {
    pub store: Arc<BoundedCategoryStore>,
    pub ledger: Arc<ModerationLedger>,
    pub tally: Arc<ModeratorTally>,
    pub cache: Arc<FeedCache>,
    pub blocklist: Arc<BlocklistManager>,
    pub filter: Arc<IngestionFilter>,
    pub items_repo: MockItemRepository,
    pub records_repo: MockModerationRepository,
}

impl Services {
    pub fn new(capacity: usize) -> Self {
        Self::with_items_repo(capacity, MockItemRepository::new())
    }

    pub fn with_items_repo(capacity: usize, items_repo: MockItemRepository) -> Self {
        Self {
            store: Arc::new(BoundedCategoryStore::new([(
                category("main"),
                capacity,
                InsertPolicy::Append,
            )])),
            ledger: Arc::new(ModerationLedger::new(Duration::hours(2))),
            tally: Arc::new(ModeratorTally::new()),
            cache: Arc::new(FeedCache::new(CacheTtls::from(&CacheConfig::default()))),
            blocklist: Arc::new(BlocklistManager::new(Arc::new(
                MockBlocklistRepository::new(),
            ))),
            filter: Arc::new(IngestionFilter::from_config(&FilterConfig::default()).unwrap()),
            items_repo,
            records_repo: MockModerationRepository::new(),
        }
    }

    pub fn ids(&self) -> Vec<String> {
        self.store
            .list(&category("main"))
            .unwrap()
            .iter()
            .map(|item| item.id.to_string())
            .collect()
    }
}
