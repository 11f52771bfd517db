use memefeed_application::use_cases::{
    BanUserUseCase, GetItemUseCase, GetProfileUseCase, ListCategoryUseCase, ListRemovedUseCase,
    RemoveItemUseCase, ReviveItemUseCase, UpdateBlocklistUseCase, UploadItemUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub list_category: Arc<ListCategoryUseCase>,
    pub get_profile: Arc<GetProfileUseCase>,
    pub get_item: Arc<GetItemUseCase>,
    pub list_removed: Arc<ListRemovedUseCase>,
    pub remove_item: Arc<RemoveItemUseCase>,
    pub revive_item: Arc<ReviveItemUseCase>,
    pub ban_user: Arc<BanUserUseCase>,
    pub update_blocklist: Arc<UpdateBlocklistUseCase>,
    pub upload_item: Arc<UploadItemUseCase>,
    /// Expected `Authorization` header value. `None` leaves the API open.
    pub api_key: Option<Arc<str>>,
}
