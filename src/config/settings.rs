//! User settings for fairshare
//!
//! Manages user preferences: currency symbol, date format, how subgroup
//! payers are attributed, and the currently selected occasion.

use serde::{Deserialize, Serialize};

use super::paths::FairsharePaths;
use crate::engine::SubgroupPolicy;
use crate::error::FairshareError;
use crate::models::OccasionId;

/// User settings for fairshare
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How expenses and settlements referencing a subgroup are attributed
    #[serde(default)]
    pub subgroup_policy: SubgroupPolicy,

    /// Occasion used when no `--occasion` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_occasion: Option<OccasionId>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            subgroup_policy: SubgroupPolicy::default(),
            active_occasion: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FairsharePaths) -> Result<Self, FairshareError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FairshareError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FairshareError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FairsharePaths) -> Result<(), FairshareError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FairshareError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            FairshareError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.subgroup_policy, SubgroupPolicy::Ignore);
        assert!(settings.active_occasion.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FairsharePaths::with_base_dir(temp_dir.path().to_path_buf());

        let occasion = OccasionId::new();
        let mut settings = Settings::default();
        settings.subgroup_policy = SubgroupPolicy::SplitAmongMembers;
        settings.active_occasion = Some(occasion);
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.subgroup_policy, SubgroupPolicy::SplitAmongMembers);
        assert_eq!(loaded.active_occasion, Some(occasion));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.schema_version, 1);
    }
}
