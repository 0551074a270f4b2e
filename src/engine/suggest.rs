//! Minimal-transfer suggester
//!
//! Greedy largest-first matching: the largest remaining debtor pays the
//! largest remaining creditor until one side runs out. Every step resolves at
//! least one party, so the number of transfers never exceeds
//! `creditors + debtors - 1`.

use serde::Serialize;
use std::fmt;

use super::balance::Balance;
use super::tolerance::{is_creditor, is_debtor, SETTLE_TOLERANCE};
use crate::models::{Money, PersonId};

/// An advisory payment that moves balances toward zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedTransfer {
    pub from_id: PersonId,
    pub from: String,
    pub to_id: PersonId,
    pub to: String,
    pub amount: Money,
}

impl fmt::Display for SuggestedTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}

struct Outstanding<'a> {
    balance: &'a Balance,
    remaining: Money,
}

/// Suggest transfers that settle the given balances.
///
/// Balances within one cent of zero are left alone. Ties between equal
/// amounts are broken by position in `balances`. An empty result means
/// everyone is settled up.
pub fn suggest_transfers(balances: &[Balance]) -> Vec<SuggestedTransfer> {
    let mut creditors: Vec<Outstanding<'_>> = balances
        .iter()
        .filter(|balance| is_creditor(balance.amount))
        .map(|balance| Outstanding {
            balance,
            remaining: balance.amount,
        })
        .collect();

    let mut debtors: Vec<Outstanding<'_>> = balances
        .iter()
        .filter(|balance| is_debtor(balance.amount))
        .map(|balance| Outstanding {
            balance,
            remaining: -balance.amount,
        })
        .collect();

    let mut transfers = Vec::new();

    while !creditors.is_empty() && !debtors.is_empty() {
        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

        let creditor = &mut creditors[0];
        let debtor = &mut debtors[0];
        let amount = creditor.remaining.min(debtor.remaining);

        transfers.push(SuggestedTransfer {
            from_id: debtor.balance.person_id,
            from: debtor.balance.person_name.clone(),
            to_id: creditor.balance.person_id,
            to: creditor.balance.person_name.clone(),
            amount,
        });

        creditor.remaining -= amount;
        debtor.remaining -= amount;

        if creditor.remaining < SETTLE_TOLERANCE {
            creditors.remove(0);
        }
        if debtor.remaining < SETTLE_TOLERANCE {
            debtors.remove(0);
        }
    }

    transfers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(entries: &[(&str, i64)]) -> Vec<Balance> {
        entries
            .iter()
            .map(|(name, cents)| Balance {
                person_id: PersonId::new(),
                person_name: name.to_string(),
                amount: Money::from_cents(*cents),
            })
            .collect()
    }

    fn summary(transfers: &[SuggestedTransfer]) -> Vec<(&str, &str, i64)> {
        transfers
            .iter()
            .map(|t| (t.from.as_str(), t.to.as_str(), t.amount.cents()))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(suggest_transfers(&[]).is_empty());
    }

    #[test]
    fn test_balanced_input_is_noop() {
        let input = balances(&[("Alice", 1), ("Bob", 0), ("Carol", -1)]);
        assert!(suggest_transfers(&input).is_empty());
    }

    #[test]
    fn test_largest_first_matching() {
        let input = balances(&[("Alice", 5000), ("Bob", 1000), ("Carol", -2500), ("Dave", -3500)]);

        let transfers = suggest_transfers(&input);

        assert_eq!(
            summary(&transfers),
            vec![
                ("Dave", "Alice", 3500),
                ("Carol", "Alice", 1500),
                ("Carol", "Bob", 1000),
            ]
        );
    }

    #[test]
    fn test_resorts_every_round() {
        // After the first round Bob (4000) outranks Alice's remainder (1000)
        let input = balances(&[("Alice", 6000), ("Bob", 4000), ("Carol", -5000), ("Dave", -5000)]);

        let transfers = suggest_transfers(&input);

        assert_eq!(
            summary(&transfers),
            vec![
                ("Carol", "Alice", 5000),
                ("Dave", "Bob", 4000),
                ("Dave", "Alice", 1000),
            ]
        );
    }

    #[test]
    fn test_ties_follow_input_order() {
        let input = balances(&[("Alice", 1000), ("Bob", 1000), ("Carol", -1000), ("Dave", -1000)]);

        let transfers = suggest_transfers(&input);

        assert_eq!(
            summary(&transfers),
            vec![("Carol", "Alice", 1000), ("Dave", "Bob", 1000)]
        );
    }

    #[test]
    fn test_transfer_count_bound() {
        let input = balances(&[
            ("A", 700),
            ("B", 300),
            ("C", 200),
            ("D", -400),
            ("E", -400),
            ("F", -400),
        ]);

        let transfers = suggest_transfers(&input);

        assert!(transfers.len() <= 5);
        assert!(transfers.iter().all(|t| t.amount.is_positive()));
        assert_eq!(
            transfers.iter().map(|t| t.amount).sum::<Money>(),
            Money::from_cents(1200)
        );
    }

    #[test]
    fn test_unbalanced_residue_stops_when_one_side_empties() {
        let input = balances(&[("Alice", 667), ("Bob", -333), ("Carol", -333)]);

        let transfers = suggest_transfers(&input);

        assert_eq!(
            summary(&transfers),
            vec![("Bob", "Alice", 333), ("Carol", "Alice", 333)]
        );
    }
}
