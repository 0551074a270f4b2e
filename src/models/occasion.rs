//! Occasion model
//!
//! An occasion (a trip, a dinner series, a shared flat) is the top-level
//! grouping that owns its people, subgroups, expenses and settlements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::OccasionId;

const MAX_NAME_LEN: usize = 100;

/// A top-level grouping of shared expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occasion {
    /// Unique identifier
    pub id: OccasionId,

    /// Occasion name
    pub name: String,

    /// When the occasion was created
    pub created_at: DateTime<Utc>,

    /// When the occasion was last modified
    pub updated_at: DateTime<Utc>,
}

impl Occasion {
    /// Create a new occasion
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: OccasionId::new(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rename the occasion
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Check if this occasion matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }

    /// Validate the occasion
    pub fn validate(&self) -> Result<(), OccasionValidationError> {
        if self.name.trim().is_empty() {
            return Err(OccasionValidationError::EmptyName);
        }

        if self.name.len() > MAX_NAME_LEN {
            return Err(OccasionValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for occasions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OccasionValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for OccasionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Occasion name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Occasion name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
        }
    }
}

impl std::error::Error for OccasionValidationError {}
