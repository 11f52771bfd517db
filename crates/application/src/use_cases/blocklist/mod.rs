mod update_blocklist;

pub use update_blocklist::{BlocklistUpdate, SupermodOverview, UpdateBlocklistUseCase};
