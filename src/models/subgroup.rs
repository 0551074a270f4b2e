//! Subgroup model
//!
//! A named set of people inside an occasion (a couple, a household) that can
//! pay for expenses or take part in settlements as a unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{OccasionId, PersonId, SubgroupId};

const MAX_NAME_LEN: usize = 100;

/// A named group of people within an occasion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subgroup {
    /// Unique identifier
    pub id: SubgroupId,

    /// Owning occasion
    pub occasion_id: OccasionId,

    /// Subgroup name
    pub name: String,

    /// Members in the order they joined
    #[serde(default)]
    pub members: Vec<PersonId>,

    /// When the subgroup was created
    pub created_at: DateTime<Utc>,
}

impl Subgroup {
    /// Create an empty subgroup
    pub fn new(occasion_id: OccasionId, name: impl Into<String>) -> Self {
        Self {
            id: SubgroupId::new(),
            occasion_id,
            name: name.into(),
            members: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a subgroup with initial members (duplicates are dropped)
    pub fn with_members(
        occasion_id: OccasionId,
        name: impl Into<String>,
        members: impl IntoIterator<Item = PersonId>,
    ) -> Self {
        let mut subgroup = Self::new(occasion_id, name);
        for member in members {
            subgroup.add_member(member);
        }
        subgroup
    }

    /// Add a member; returns false if already present
    pub fn add_member(&mut self, person_id: PersonId) -> bool {
        if self.has_member(person_id) {
            return false;
        }
        self.members.push(person_id);
        true
    }

    /// Remove a member; returns false if not present
    pub fn remove_member(&mut self, person_id: PersonId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| *member != person_id);
        self.members.len() != before
    }

    pub fn has_member(&self, person_id: PersonId) -> bool {
        self.members.contains(&person_id)
    }

    /// Check if this subgroup matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Validate the subgroup
    pub fn validate(&self) -> Result<(), SubgroupValidationError> {
        if self.name.trim().is_empty() {
            return Err(SubgroupValidationError::EmptyName);
        }

        if self.name.len() > MAX_NAME_LEN {
            return Err(SubgroupValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Subgroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for subgroups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubgroupValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for SubgroupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Subgroup name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Subgroup name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
        }
    }
}

impl std::error::Error for SubgroupValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let alice = PersonId::new();
        let bob = PersonId::new();
        let mut couple = Subgroup::with_members(OccasionId::new(), "Couple", [alice, bob, alice]);

        assert_eq!(couple.members, vec![alice, bob]);
        assert!(!couple.add_member(bob));
        assert!(couple.remove_member(alice));
        assert!(!couple.remove_member(alice));
        assert_eq!(couple.members, vec![bob]);
    }

    #[test]
    fn test_validation() {
        let subgroup = Subgroup::new(OccasionId::new(), "   ");
        assert_eq!(subgroup.validate(), Err(SubgroupValidationError::EmptyName));
    }
}
