//! First-run setup

use tracing::info;

use crate::config::{paths::FairsharePaths, settings::Settings};
use crate::error::FairshareError;

/// Create the directory layout and a default settings file.
///
/// Existing settings are left untouched. Returns true if this was a fresh
/// installation.
pub fn initialize_storage(paths: &FairsharePaths) -> Result<bool, FairshareError> {
    paths.ensure_directories()?;

    if paths.is_initialized() {
        return Ok(false);
    }

    Settings::default().save(paths)?;
    info!(base_dir = %paths.base_dir().display(), "initialized data directory");
    Ok(true)
}
