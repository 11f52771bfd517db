mod capacity_sweep;
mod restore_state;
mod tally_sweep;

pub use capacity_sweep::{CapacitySweepReport, CapacitySweepUseCase};
pub use restore_state::{RestoreReport, RestoreStateUseCase};
pub use tally_sweep::{TallySweepReport, TallySweepUseCase};
