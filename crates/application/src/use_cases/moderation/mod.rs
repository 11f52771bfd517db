mod ban_user;
mod remove_item;
mod revive_item;

pub use ban_user::BanUserUseCase;
pub use remove_item::RemoveItemUseCase;
pub use revive_item::ReviveItemUseCase;
