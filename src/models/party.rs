//! Party references
//!
//! Expenses are paid by, and settlements flow between, either a single person
//! or a subgroup. `Party` makes the two cases mutually exclusive.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{PersonId, SubgroupId};

/// A reference to a person or a subgroup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Party {
    Person(PersonId),
    Subgroup(SubgroupId),
}

impl Party {
    /// The person ID, if this party is a person
    pub fn person(&self) -> Option<PersonId> {
        match self {
            Self::Person(id) => Some(*id),
            Self::Subgroup(_) => None,
        }
    }

    /// The subgroup ID, if this party is a subgroup
    pub fn subgroup(&self) -> Option<SubgroupId> {
        match self {
            Self::Person(_) => None,
            Self::Subgroup(id) => Some(*id),
        }
    }

    pub fn is_person(&self, id: PersonId) -> bool {
        self.person() == Some(id)
    }

    pub fn is_subgroup(&self, id: SubgroupId) -> bool {
        self.subgroup() == Some(id)
    }
}

impl From<PersonId> for Party {
    fn from(id: PersonId) -> Self {
        Self::Person(id)
    }
}

impl From<SubgroupId> for Party {
    fn from(id: SubgroupId) -> Self {
        Self::Subgroup(id)
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person(id) => write!(f, "{}", id),
            Self::Subgroup(id) => write!(f, "{}", id),
        }
    }
}
