pub mod blocklist;
pub mod feed;
pub mod ingestion;
pub mod maintenance;
pub mod moderation;

// Re-export use cases
pub use blocklist::{BlocklistUpdate, SupermodOverview, UpdateBlocklistUseCase};
pub use feed::{GetItemUseCase, GetProfileUseCase, ListCategoryUseCase, ListRemovedUseCase};
pub use ingestion::{IngestOutcome, IngestRecordUseCase, UploadItemUseCase};
pub use maintenance::{
    CapacitySweepReport, CapacitySweepUseCase, RestoreReport, RestoreStateUseCase,
    TallySweepReport, TallySweepUseCase,
};
pub use moderation::{BanUserUseCase, RemoveItemUseCase, ReviveItemUseCase};
