pub mod state;
pub mod updater;

pub use state::{read_current_state, PackageState};
pub use updater::PackageFileUpdater;
