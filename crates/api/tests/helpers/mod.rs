#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use memefeed_api::{create_api_routes, AppState};
use memefeed_application::ports::{BlocklistRepository, ItemRepository, ModerationRepository};
use memefeed_application::services::{
    BlocklistManager, BoundedCategoryStore, CacheTtls, FeedCache, ModerationLedger,
    ModeratorTally,
};
use memefeed_application::use_cases::{
    BanUserUseCase, GetItemUseCase, GetProfileUseCase, ListCategoryUseCase, ListRemovedUseCase,
    RemoveItemUseCase, ReviveItemUseCase, UpdateBlocklistUseCase, UploadItemUseCase,
};
use memefeed_domain::{Category, InsertPolicy, Item, ItemStatus};
use memefeed_infrastructure::database::run_migrations;
use memefeed_infrastructure::repositories::{
    SqliteBlocklistRepository, SqliteItemRepository, SqliteModerationRepository,
};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const API_KEY: &str = "test-api-key";
pub const SUPERMOD_PASSWORD: &str = "hunter2";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<BoundedCategoryStore>,
    pub ledger: Arc<ModerationLedger>,
    pub blocklist: Arc<BlocklistManager>,
    pub items: Arc<dyn ItemRepository>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::build(None).await
    }

    pub async fn with_api_key() -> Self {
        Self::build(Some(API_KEY)).await
    }

    async fn build(api_key: Option<&str>) -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();

        let items: Arc<dyn ItemRepository> = Arc::new(SqliteItemRepository::new(pool.clone()));
        let records: Arc<dyn ModerationRepository> =
            Arc::new(SqliteModerationRepository::new(pool.clone()));
        let blocklist_repo: Arc<dyn BlocklistRepository> =
            Arc::new(SqliteBlocklistRepository::new(pool));

        let store = Arc::new(BoundedCategoryStore::new([
            (category("main"), 3, InsertPolicy::Append),
            (category("community"), 5, InsertPolicy::Prepend),
        ]));
        let ledger = Arc::new(ModerationLedger::new(chrono::Duration::hours(2)));
        let blocklist = Arc::new(BlocklistManager::new(blocklist_repo));
        let tally = Arc::new(ModeratorTally::new());
        let cache = Arc::new(FeedCache::new(CacheTtls {
            list: Duration::from_secs(90),
            profile: Duration::from_secs(60),
            item: Duration::from_secs(60),
            removed: Duration::from_secs(30),
        }));

        let state = AppState {
            list_category: Arc::new(ListCategoryUseCase::new(store.clone(), cache.clone())),
            get_profile: Arc::new(GetProfileUseCase::new(store.clone(), cache.clone())),
            get_item: Arc::new(GetItemUseCase::new(
                store.clone(),
                ledger.clone(),
                cache.clone(),
            )),
            list_removed: Arc::new(ListRemovedUseCase::new(ledger.clone(), cache.clone())),
            remove_item: Arc::new(RemoveItemUseCase::new(
                ledger.clone(),
                store.clone(),
                items.clone(),
                records.clone(),
                cache.clone(),
            )),
            revive_item: Arc::new(ReviveItemUseCase::new(
                ledger.clone(),
                store.clone(),
                items.clone(),
                records.clone(),
                cache.clone(),
            )),
            ban_user: Arc::new(BanUserUseCase::new(
                blocklist.clone(),
                ledger.clone(),
                store.clone(),
                items.clone(),
                records,
                cache.clone(),
            )),
            update_blocklist: Arc::new(UpdateBlocklistUseCase::new(
                blocklist.clone(),
                tally,
                store.clone(),
                Some(SUPERMOD_PASSWORD.to_string()),
            )),
            upload_item: Arc::new(UploadItemUseCase::new(
                ledger.clone(),
                store.clone(),
                items.clone(),
                cache,
            )),
            api_key: api_key.map(Arc::from),
        };

        Self {
            router: create_api_routes(state),
            store,
            ledger,
            blocklist,
            items,
        }
    }

    pub fn seed(&self, items: &[Item]) {
        for item in items {
            self.store.insert(item.clone()).unwrap();
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .send(Request::get(uri).body(Body::empty()).unwrap())
            .await;
        read_json(response).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send_json("POST", uri, body).await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        read_json(self.send(request).await).await
    }
}

/// Status plus the body parsed as JSON, or as a JSON string for plain-text
/// error bodies.
pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

pub fn category(name: &str) -> Category {
    Category::new(name).unwrap()
}

pub fn make_item(id: &str, username: &str, category_name: &str) -> Item {
    Item {
        id: Arc::from(id),
        author_id: Arc::from(format!("uid-{}", username).as_str()),
        username: Arc::from(username),
        display_name: username.to_string(),
        profile_image_url: String::new(),
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

pub fn ids(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect()
}
