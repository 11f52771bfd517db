mod get_item;
mod get_profile;
mod list_category;
mod list_removed;

pub use get_item::GetItemUseCase;
pub use get_profile::GetProfileUseCase;
pub use list_category::ListCategoryUseCase;
pub use list_removed::ListRemovedUseCase;

pub(crate) const DEFAULT_LIMIT: usize = 20;
pub(crate) const MAX_LIMIT: usize = 100;

pub(crate) fn clamp_limit(limit: usize) -> usize {
    if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    }
}
