use super::{Repositories, Services};
use memefeed_api::AppState;
use memefeed_application::use_cases::{
    BanUserUseCase, CapacitySweepUseCase, GetItemUseCase, GetProfileUseCase,
    IngestRecordUseCase, ListCategoryUseCase, ListRemovedUseCase, RemoveItemUseCase,
    RestoreStateUseCase, ReviveItemUseCase, TallySweepUseCase, UpdateBlocklistUseCase,
    UploadItemUseCase,
};
use memefeed_domain::Config;
use std::sync::Arc;

pub struct UseCases {
    pub list_category: Arc<ListCategoryUseCase>,
    pub get_profile: Arc<GetProfileUseCase>,
    pub get_item: Arc<GetItemUseCase>,
    pub list_removed: Arc<ListRemovedUseCase>,
    pub remove_item: Arc<RemoveItemUseCase>,
    pub revive_item: Arc<ReviveItemUseCase>,
    pub ban_user: Arc<BanUserUseCase>,
    pub update_blocklist: Arc<UpdateBlocklistUseCase>,
    pub upload_item: Arc<UploadItemUseCase>,
    pub ingest_record: Arc<IngestRecordUseCase>,
    pub capacity_sweep: Arc<CapacitySweepUseCase>,
    pub tally_sweep: Arc<TallySweepUseCase>,
    pub restore_state: Arc<RestoreStateUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, repos: &Repositories, services: &Services) -> Self {
        let Services {
            filter,
            store,
            ledger,
            blocklist,
            tally,
            cache,
        } = services;

        Self {
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
                repos.items.clone(),
                repos.records.clone(),
                cache.clone(),
            )),
            revive_item: Arc::new(ReviveItemUseCase::new(
                ledger.clone(),
                store.clone(),
                repos.items.clone(),
                repos.records.clone(),
                cache.clone(),
            )),
            ban_user: Arc::new(BanUserUseCase::new(
                blocklist.clone(),
                ledger.clone(),
                store.clone(),
                repos.items.clone(),
                repos.records.clone(),
                cache.clone(),
            )),
            update_blocklist: Arc::new(UpdateBlocklistUseCase::new(
                blocklist.clone(),
                tally.clone(),
                store.clone(),
                config.server.supermod_password.clone(),
            )),
            upload_item: Arc::new(UploadItemUseCase::new(
                ledger.clone(),
                store.clone(),
                repos.items.clone(),
                cache.clone(),
            )),
            ingest_record: Arc::new(IngestRecordUseCase::new(
                filter.clone(),
                blocklist.clone(),
                ledger.clone(),
                store.clone(),
                repos.items.clone(),
                cache.clone(),
            )),
            capacity_sweep: Arc::new(CapacitySweepUseCase::new(
                store.clone(),
                repos.items.clone(),
                cache.clone(),
            )),
            tally_sweep: Arc::new(TallySweepUseCase::new(
                blocklist.clone(),
                ledger.clone(),
                tally.clone(),
                repos.records.clone(),
                cache.clone(),
            )),
            restore_state: Arc::new(RestoreStateUseCase::new(
                store.clone(),
                ledger.clone(),
                tally.clone(),
                blocklist.clone(),
                repos.items.clone(),
                repos.records.clone(),
            )),
        }
    }

    pub fn app_state(&self, config: &Config) -> AppState {
        AppState {
            list_category: self.list_category.clone(),
            get_profile: self.get_profile.clone(),
            get_item: self.get_item.clone(),
            list_removed: self.list_removed.clone(),
            remove_item: self.remove_item.clone(),
            revive_item: self.revive_item.clone(),
            ban_user: self.ban_user.clone(),
            update_blocklist: self.update_blocklist.clone(),
            upload_item: self.upload_item.clone(),
            api_key: config.server.api_key.as_deref().map(Arc::from),
        }
    }
}
