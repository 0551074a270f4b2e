//! Core data models for fairshare
//!
//! Occasions own people, subgroups, expenses (with their per-person splits)
//! and settlements. Amounts are whole cents.

pub mod expense;
pub mod ids;
pub mod money;
pub mod occasion;
pub mod party;
pub mod person;
pub mod settlement;
pub mod subgroup;

pub use expense::{Expense, ExpenseSplit, ExpenseValidationError, DEFAULT_CATEGORY};
pub use ids::{ExpenseId, OccasionId, PersonId, SettlementId, SplitId, SubgroupId};
pub use money::{Money, MoneyParseError};
pub use occasion::{Occasion, OccasionValidationError};
pub use party::Party;
pub use person::{Person, PersonValidationError};
pub use settlement::{Settlement, SettlementValidationError};
pub use subgroup::{Subgroup, SubgroupValidationError};
