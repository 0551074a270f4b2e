//! Expense model
//!
//! An expense is paid by one party and shared among a set of people. Each
//! person's portion is stored as a separate `ExpenseSplit` record so that the
//! split list can be read independently of the expenses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, OccasionId, PersonId, SplitId};
use super::money::Money;
use super::party::Party;

/// Category used when none is given
pub const DEFAULT_CATEGORY: &str = "General";

/// A shared expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Owning occasion
    pub occasion_id: OccasionId,

    /// Who paid: a person or a subgroup
    pub payer: Party,

    /// Total amount paid (always positive)
    pub amount: Money,

    /// What the money was spent on
    pub description: String,

    /// Free-form category tag
    #[serde(default = "default_category")]
    pub category: String,

    /// Optional note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Date of the expense
    pub date: NaiveDate,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Expense {
    /// Create a new expense
    pub fn new(
        occasion_id: OccasionId,
        payer: Party,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            occasion_id,
            payer,
            amount,
            description: description.into(),
            category: default_category(),
            note: None,
            date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build the equal-share splits of this expense among `participants`.
    ///
    /// Shares are whole cents; the first participants absorb the remainder so
    /// the splits sum exactly to the expense amount.
    pub fn equal_splits(&self, participants: &[PersonId]) -> Vec<ExpenseSplit> {
        participants
            .iter()
            .zip(self.amount.split_evenly(participants.len()))
            .map(|(&person_id, share)| ExpenseSplit::new(self.id, person_id, share))
            .collect()
    }

    /// Mark the expense as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description, self.amount)
    }
}

/// One person's share of an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSplit {
    /// Unique identifier
    pub id: SplitId,

    /// The expense this split belongs to
    pub expense_id: ExpenseId,

    /// The person who owes this share
    pub person_id: PersonId,

    /// The share amount
    pub amount: Money,
}

impl ExpenseSplit {
    /// Create a new split
    pub fn new(expense_id: ExpenseId, person_id: PersonId, amount: Money) -> Self {
        Self {
            id: SplitId::new(),
            expense_id,
            person_id,
            amount,
        }
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    EmptyDescription,
    EmptyCategory,
    NoParticipants,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive (got {})", amount)
            }
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::EmptyCategory => write!(f, "Expense category cannot be empty"),
            Self::NoParticipants => {
                write!(f, "An expense must be split among at least one person")
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
