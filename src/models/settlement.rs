//! Settlement model
//!
//! A settlement records a real-world payment between two parties. It raises
//! the payer's balance and lowers the receiver's.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{OccasionId, SettlementId};
use super::money::Money;
use super::party::Party;

/// A recorded payment between two parties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// Unique identifier
    pub id: SettlementId,

    /// Owning occasion
    pub occasion_id: OccasionId,

    /// Who paid
    pub from: Party,

    /// Who received
    pub to: Party,

    /// Amount paid (always positive)
    pub amount: Money,

    /// Date of the payment
    pub date: NaiveDate,

    /// When the settlement was recorded
    pub created_at: DateTime<Utc>,
}

impl Settlement {
    /// Create a new settlement
    pub fn new(
        occasion_id: OccasionId,
        from: Party,
        to: Party,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: SettlementId::new(),
            occasion_id,
            from,
            to,
            amount,
            date,
            created_at: Utc::now(),
        }
    }

    /// Check if a party takes part in this settlement
    pub fn involves(&self, party: Party) -> bool {
        self.from == party || self.to == party
    }

    /// Validate the settlement
    pub fn validate(&self) -> Result<(), SettlementValidationError> {
        if !self.amount.is_positive() {
            return Err(SettlementValidationError::NonPositiveAmount(self.amount));
        }

        if self.from == self.to {
            return Err(SettlementValidationError::SameParty);
        }

        Ok(())
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}

/// Validation errors for settlements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementValidationError {
    NonPositiveAmount(Money),
    SameParty,
}

impl fmt::Display for SettlementValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Settlement amount must be positive (got {})", amount)
            }
            Self::SameParty => write!(f, "A settlement needs two different parties"),
        }
    }
}

impl std::error::Error for SettlementValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonId, SubgroupId};

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 20).unwrap()
    }

    #[test]
    fn test_validation() {
        let occasion = OccasionId::new();
        let alice = Party::Person(PersonId::new());
        let bob = Party::Person(PersonId::new());

        let ok = Settlement::new(occasion, alice, bob, Money::from_cents(1000), test_date());
        assert!(ok.validate().is_ok());

        let same = Settlement::new(occasion, alice, alice, Money::from_cents(1000), test_date());
        assert_eq!(same.validate(), Err(SettlementValidationError::SameParty));

        let negative = Settlement::new(occasion, alice, bob, Money::from_cents(-1), test_date());
        assert!(matches!(
            negative.validate(),
            Err(SettlementValidationError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_involves() {
        let alice = Party::Person(PersonId::new());
        let household = Party::Subgroup(SubgroupId::new());
        let settlement = Settlement::new(
            OccasionId::new(),
            alice,
            household,
            Money::from_cents(500),
            test_date(),
        );

        assert!(settlement.involves(alice));
        assert!(settlement.involves(household));
        assert!(!settlement.involves(Party::Person(PersonId::new())));
    }
}
