//! Path management for fairshare
//!
//! ## Path Resolution Order
//!
//! 1. `FAIRSHARE_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/fairshare` on Linux, `%APPDATA%\fairshare\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FairshareError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FAIRSHARE_DATA_DIR";

/// Manages all paths used by fairshare
#[derive(Debug, Clone)]
pub struct FairsharePaths {
    /// Base directory for all fairshare data
    base_dir: PathBuf,
}

impl FairsharePaths {
    /// Create a new FairsharePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and
    /// `FAIRSHARE_DATA_DIR` is not set.
    pub fn new() -> Result<Self, FairshareError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create FairsharePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn occasions_file(&self) -> PathBuf {
        self.data_dir().join("occasions.json")
    }

    pub fn people_file(&self) -> PathBuf {
        self.data_dir().join("people.json")
    }

    pub fn subgroups_file(&self) -> PathBuf {
        self.data_dir().join("subgroups.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn splits_file(&self) -> PathBuf {
        self.data_dir().join("splits.json")
    }

    pub fn settlements_file(&self) -> PathBuf {
        self.data_dir().join("settlements.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FairshareError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FairshareError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FairshareError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if fairshare has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FairshareError> {
    ProjectDirs::from("", "", "fairshare")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FairshareError::Config("Could not determine a home directory".into()))
}
