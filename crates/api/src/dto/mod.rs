pub mod feed;
pub mod moderation;
pub mod supermod;
pub mod upload;

pub use feed::{ItemResponse, PageQuery, PageResponse};
pub use moderation::{BanResponse, ModerationResponse, RemoveRequest, UnbanResponse};
pub use supermod::{SupermodRequest, SupermodResponse};
pub use upload::UploadRequest;
