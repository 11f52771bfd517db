use super::mock_repositories::{
    MockBlocklistRepository, MockItemRepository, MockModerationRepository,
};
use chrono::{DateTime, Duration, Utc};
use memefeed_application::services::{
    BlocklistManager, BoundedCategoryStore, CacheTtls, FeedCache, IngestionFilter,
    ModerationLedger, ModeratorTally,
};
use memefeed_application::use_cases::{
    BanUserUseCase, GetItemUseCase, GetProfileUseCase, IngestRecordUseCase, ListCategoryUseCase,
    ListRemovedUseCase, RemoveItemUseCase, ReviveItemUseCase, UpdateBlocklistUseCase,
    UploadItemUseCase,
};
use memefeed_domain::config::FilterConfig;
use memefeed_domain::raw_record::{
    RawEntities, RawIncludes, RawMedia, RawPost, RawReference, RawRule, RawUrl, RawUser,
};
use memefeed_domain::{Category, InsertPolicy, Item, ItemStatus, RawRecord};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const SUPERMOD_PASSWORD: &str = "hunter2";

pub fn category(name: &str) -> Category {
    Category::new(name).unwrap()
}

pub fn make_item(id: &str, username: &str, category_name: &str) -> Item {
    Item {
        id: Arc::from(id),
        author_id: Arc::from(format!("uid-{}", username).as_str()),
        username: Arc::from(username),
        display_name: username.to_string(),
        profile_image_url: format!("https://img.example/{}.png", username),
        text: format!("meme {}", id),
        created_at: None,
        content_link: format!("https://twitter.com/{}/status/{}", username, id),
        media_url: format!("https://img.example/media/{}.jpg", id),
        source: "Recently uploaded".to_string(),
        category: category(category_name),
        status: ItemStatus::Active,
        removed_by: None,
    }
}

/// A record that passes every filter check at `now`.
pub fn make_raw_record(id: &str, username: &str, now: DateTime<Utc>) -> RawRecord {
    RawRecord {
        data: Some(RawPost {
            id: id.to_string(),
            text: format!("look at this {}", id),
            entities: None,
            referenced_tweets: Vec::new(),
        }),
        includes: Some(RawIncludes {
            media: vec![RawMedia {
                kind: "photo".to_string(),
                url: Some(format!("https://img.example/media/{}.jpg", id)),
                media_key: format!("3_{}", id),
            }],
            users: vec![RawUser {
                id: format!("uid-{}", username),
                username: username.to_string(),
                name: username.to_string(),
                profile_image_url: String::new(),
                created_at: Some((now - Duration::days(365)).to_rfc3339()),
            }],
        }),
        matching_rules: Vec::new(),
    }
}

pub fn with_account_age(mut raw: RawRecord, age: Duration, now: DateTime<Utc>) -> RawRecord {
    if let Some(user) = raw.includes.as_mut().and_then(|i| i.users.first_mut()) {
        user.created_at = Some((now - age).to_rfc3339());
    }
    raw
}

pub fn with_text(mut raw: RawRecord, text: &str) -> RawRecord {
    if let Some(post) = raw.data.as_mut() {
        post.text = text.to_string();
    }
    raw
}

pub fn with_media_kind(mut raw: RawRecord, kind: &str) -> RawRecord {
    if let Some(media) = raw.includes.as_mut().and_then(|i| i.media.first_mut()) {
        media.kind = kind.to_string();
    }
    raw
}

pub fn with_reference(mut raw: RawRecord, kind: &str) -> RawRecord {
    if let Some(post) = raw.data.as_mut() {
        post.referenced_tweets.push(RawReference {
            kind: kind.to_string(),
            id: "999".to_string(),
        });
    }
    raw
}

pub fn with_url(mut raw: RawRecord, expanded: &str) -> RawRecord {
    if let Some(post) = raw.data.as_mut() {
        post.entities = Some(RawEntities {
            urls: vec![RawUrl {
                url: "https://t.co/abc".to_string(),
                expanded_url: Some(expanded.to_string()),
            }],
        });
    }
    raw
}

pub fn with_rule(mut raw: RawRecord, tag: &str) -> RawRecord {
    raw.matching_rules.push(RawRule {
        tag: tag.to_string(),
    });
    raw
}

pub fn filter_config() -> FilterConfig {
    FilterConfig {
        rule_categories: BTreeMap::from([(
            "Community memes".to_string(),
            "community".to_string(),
        )]),
        ..FilterConfig::default()
    }
}

/// All services and use cases wired over in-memory mocks.
pub struct Pipeline {
    pub store: Arc<BoundedCategoryStore>,
    pub ledger: Arc<ModerationLedger>,
    pub tally: Arc<ModeratorTally>,
    pub cache: Arc<FeedCache>,
    pub blocklist: Arc<BlocklistManager>,
    pub filter: Arc<IngestionFilter>,
    pub items_repo: MockItemRepository,
    pub records_repo: MockModerationRepository,
    pub blocklist_repo: MockBlocklistRepository,
}

impl Pipeline {
    pub fn new(main_capacity: usize) -> Self {
        Self::with_repos(
            main_capacity,
            MockItemRepository::new(),
            MockModerationRepository::new(),
            MockBlocklistRepository::new(),
        )
    }

    pub fn with_repos(
        main_capacity: usize,
        items_repo: MockItemRepository,
        records_repo: MockModerationRepository,
        blocklist_repo: MockBlocklistRepository,
    ) -> Self {
        let store = Arc::new(BoundedCategoryStore::new([
            (category("main"), main_capacity, InsertPolicy::Append),
            (category("community"), 5, InsertPolicy::Prepend),
        ]));
        let ttls = CacheTtls {
            list: std::time::Duration::from_secs(90),
            profile: std::time::Duration::from_secs(60),
            item: std::time::Duration::from_secs(60),
            removed: std::time::Duration::from_secs(30),
        };

        Self {
            store,
            ledger: Arc::new(ModerationLedger::new(Duration::hours(2))),
            tally: Arc::new(ModeratorTally::new()),
            cache: Arc::new(FeedCache::new(ttls)),
            blocklist: Arc::new(BlocklistManager::new(Arc::new(blocklist_repo.clone()))),
            filter: Arc::new(IngestionFilter::from_config(&filter_config()).unwrap()),
            items_repo,
            records_repo,
            blocklist_repo,
        }
    }

    pub fn ingest(&self) -> IngestRecordUseCase {
        IngestRecordUseCase::new(
            self.filter.clone(),
            self.blocklist.clone(),
            self.ledger.clone(),
            self.store.clone(),
            Arc::new(self.items_repo.clone()),
            self.cache.clone(),
        )
    }

    pub fn upload(&self) -> UploadItemUseCase {
        UploadItemUseCase::new(
            self.ledger.clone(),
            self.store.clone(),
            Arc::new(self.items_repo.clone()),
            self.cache.clone(),
        )
    }

    pub fn list(&self) -> ListCategoryUseCase {
        ListCategoryUseCase::new(self.store.clone(), self.cache.clone())
    }

    pub fn profile(&self) -> GetProfileUseCase {
        GetProfileUseCase::new(self.store.clone(), self.cache.clone())
    }

    pub fn get_item(&self) -> GetItemUseCase {
        GetItemUseCase::new(self.store.clone(), self.ledger.clone(), self.cache.clone())
    }

    pub fn list_removed(&self) -> ListRemovedUseCase {
        ListRemovedUseCase::new(self.ledger.clone(), self.cache.clone())
    }

    pub fn remove(&self) -> RemoveItemUseCase {
        RemoveItemUseCase::new(
            self.ledger.clone(),
            self.store.clone(),
            Arc::new(self.items_repo.clone()),
            Arc::new(self.records_repo.clone()),
            self.cache.clone(),
        )
    }

    pub fn revive(&self) -> ReviveItemUseCase {
        ReviveItemUseCase::new(
            self.ledger.clone(),
            self.store.clone(),
            Arc::new(self.items_repo.clone()),
            Arc::new(self.records_repo.clone()),
            self.cache.clone(),
        )
    }

    pub fn ban(&self) -> BanUserUseCase {
        BanUserUseCase::new(
            self.blocklist.clone(),
            self.ledger.clone(),
            self.store.clone(),
            Arc::new(self.items_repo.clone()),
            Arc::new(self.records_repo.clone()),
            self.cache.clone(),
        )
    }

    pub fn update_blocklist(&self) -> UpdateBlocklistUseCase {
        UpdateBlocklistUseCase::new(
            self.blocklist.clone(),
            self.tally.clone(),
            self.store.clone(),
            Some(SUPERMOD_PASSWORD.to_string()),
        )
    }

    pub fn ids(&self, name: &str) -> Vec<String> {
        self.store
            .list(&category(name))
            .unwrap()
            .iter()
            .map(|item| item.id.to_string())
            .collect()
    }
}
