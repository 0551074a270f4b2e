//! Integrity report
//!
//! The balance calculator silently skips anything it cannot attribute. This
//! module finds those records so they can be shown to the user instead.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::ledger::LedgerSnapshot;
use super::tolerance::{is_settled, SETTLE_TOLERANCE};
use super::SubgroupPolicy;
use crate::models::{ExpenseId, Money, Party, PersonId, SettlementId, SplitId, SubgroupId};

/// A record the balance calculator cannot fully account for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum IntegrityIssue {
    /// A split of one of the occasion's expenses names someone outside it
    SplitForUnknownPerson {
        split_id: SplitId,
        expense_id: ExpenseId,
        person_id: PersonId,
    },

    /// A person's split points at an expense the occasion does not have
    SplitForUnknownExpense {
        split_id: SplitId,
        expense_id: ExpenseId,
        person_id: PersonId,
    },

    /// The splits of an expense do not add up to its amount
    SplitTotalMismatch {
        expense_id: ExpenseId,
        description: String,
        expected: Money,
        actual: Money,
    },

    /// A subgroup paid, but the policy attributes subgroup amounts to no one
    IgnoredSubgroupPayer {
        expense_id: ExpenseId,
        description: String,
        subgroup_id: SubgroupId,
    },

    /// An expense payer is a person outside the occasion
    UnknownPayer {
        expense_id: ExpenseId,
        description: String,
        person_id: PersonId,
    },

    /// A settlement side that does not move anyone's balance
    IgnoredSettlementParty {
        settlement_id: SettlementId,
        party: Party,
    },

    /// A subgroup reference that does not resolve
    UnknownSubgroup { subgroup_id: SubgroupId },

    /// Balances do not sum to zero
    NonZeroTotal { total: Money },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SplitForUnknownPerson {
                split_id,
                expense_id,
                person_id,
            } => write!(
                f,
                "Split {} of expense {} belongs to unknown person {}",
                split_id, expense_id, person_id
            ),
            Self::SplitForUnknownExpense {
                split_id,
                expense_id,
                person_id,
            } => write!(
                f,
                "Split {} of person {} refers to missing expense {}",
                split_id, person_id, expense_id
            ),
            Self::SplitTotalMismatch {
                description,
                expected,
                actual,
                ..
            } => write!(
                f,
                "Splits of '{}' add up to {} instead of {}",
                description, actual, expected
            ),
            Self::IgnoredSubgroupPayer {
                description,
                subgroup_id,
                ..
            } => write!(
                f,
                "'{}' was paid by subgroup {}, which is not counted in balances",
                description, subgroup_id
            ),
            Self::UnknownPayer {
                description,
                person_id,
                ..
            } => write!(
                f,
                "'{}' was paid by unknown person {}",
                description, person_id
            ),
            Self::IgnoredSettlementParty {
                settlement_id,
                party,
            } => write!(
                f,
                "Settlement {} side {} is not counted in balances",
                settlement_id, party
            ),
            Self::UnknownSubgroup { subgroup_id } => {
                write!(f, "Subgroup {} does not exist", subgroup_id)
            }
            Self::NonZeroTotal { total } => {
                write!(f, "Balances sum to {} instead of zero", total)
            }
        }
    }
}

/// Check a snapshot for records the calculator would skip or miscount
pub fn check(snapshot: &LedgerSnapshot, policy: SubgroupPolicy) -> Vec<IntegrityIssue> {
    let people: HashSet<PersonId> = snapshot.people.iter().map(|p| p.id).collect();
    let subgroups: HashSet<SubgroupId> = snapshot.subgroups.iter().map(|s| s.id).collect();
    let expenses: HashSet<ExpenseId> = snapshot.expenses.iter().map(|e| e.id).collect();

    let mut issues = Vec::new();
    let mut split_totals: HashMap<ExpenseId, Money> = HashMap::new();
    let mut unknown_subgroups: Vec<SubgroupId> = Vec::new();

    for split in &snapshot.splits {
        let known_person = people.contains(&split.person_id);
        let known_expense = expenses.contains(&split.expense_id);

        if known_expense {
            *split_totals.entry(split.expense_id).or_default() += split.amount;
        }

        match (known_person, known_expense) {
            (false, true) => issues.push(IntegrityIssue::SplitForUnknownPerson {
                split_id: split.id,
                expense_id: split.expense_id,
                person_id: split.person_id,
            }),
            (true, false) => issues.push(IntegrityIssue::SplitForUnknownExpense {
                split_id: split.id,
                expense_id: split.expense_id,
                person_id: split.person_id,
            }),
            // Neither side is ours: a split of another occasion
            _ => {}
        }
    }

    for expense in &snapshot.expenses {
        let actual = split_totals.get(&expense.id).copied().unwrap_or_default();
        if !is_settled(actual - expense.amount) {
            issues.push(IntegrityIssue::SplitTotalMismatch {
                expense_id: expense.id,
                description: expense.description.clone(),
                expected: expense.amount,
                actual,
            });
        }

        match expense.payer {
            Party::Person(person_id) if !people.contains(&person_id) => {
                issues.push(IntegrityIssue::UnknownPayer {
                    expense_id: expense.id,
                    description: expense.description.clone(),
                    person_id,
                });
            }
            Party::Person(_) => {}
            Party::Subgroup(subgroup_id) => {
                if !subgroups.contains(&subgroup_id) {
                    note_unknown(&mut unknown_subgroups, subgroup_id);
                }
                if policy == SubgroupPolicy::Ignore {
                    issues.push(IntegrityIssue::IgnoredSubgroupPayer {
                        expense_id: expense.id,
                        description: expense.description.clone(),
                        subgroup_id,
                    });
                }
            }
        }
    }

    for settlement in &snapshot.settlements {
        for party in [settlement.from, settlement.to] {
            let counted = match party {
                Party::Person(person_id) => people.contains(&person_id),
                Party::Subgroup(subgroup_id) => {
                    let known = subgroups.contains(&subgroup_id);
                    if !known {
                        note_unknown(&mut unknown_subgroups, subgroup_id);
                    }
                    known && policy == SubgroupPolicy::SplitAmongMembers
                }
            };

            if !counted {
                issues.push(IntegrityIssue::IgnoredSettlementParty {
                    settlement_id: settlement.id,
                    party,
                });
            }
        }
    }

    issues.extend(
        unknown_subgroups
            .into_iter()
            .map(|subgroup_id| IntegrityIssue::UnknownSubgroup { subgroup_id }),
    );

    let total: Money = snapshot
        .balances(policy)
        .iter()
        .map(|balance| balance.amount)
        .sum();
    if total.abs() > SETTLE_TOLERANCE {
        issues.push(IntegrityIssue::NonZeroTotal { total });
    }

    issues
}

fn note_unknown(unknown: &mut Vec<SubgroupId>, subgroup_id: SubgroupId) {
    if !unknown.contains(&subgroup_id) {
        unknown.push(subgroup_id);
    }
}
