//! Balance calculator
//!
//! Reduces an occasion's expenses, splits and settlements to one signed
//! balance per person. Positive means the person is owed money.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::tolerance;
use super::SubgroupPolicy;
use crate::models::{Expense, ExpenseSplit, Money, Party, Person, PersonId, Settlement, Subgroup};

/// Net position of one person
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub person_id: PersonId,
    pub person_name: String,
    pub amount: Money,
}

impl Balance {
    /// Within one cent of zero
    pub fn is_settled(&self) -> bool {
        tolerance::is_settled(self.amount)
    }
}

/// Computes balances under a subgroup attribution policy
#[derive(Debug, Clone, Copy)]
pub struct BalanceCalculator<'a> {
    policy: SubgroupPolicy,
    subgroups: &'a [Subgroup],
}

impl Default for BalanceCalculator<'_> {
    fn default() -> Self {
        Self {
            policy: SubgroupPolicy::Ignore,
            subgroups: &[],
        }
    }
}

impl<'a> BalanceCalculator<'a> {
    pub fn new(policy: SubgroupPolicy, subgroups: &'a [Subgroup]) -> Self {
        Self { policy, subgroups }
    }

    /// Compute one balance per person, largest creditor first.
    ///
    /// Every person appears exactly once, in input order among equal
    /// balances. References to people outside `people` have no effect.
    pub fn compute(
        &self,
        people: &[Person],
        expenses: &[Expense],
        splits: &[ExpenseSplit],
        settlements: &[Settlement],
    ) -> Vec<Balance> {
        let mut ledger = Accumulator::new(people);

        for expense in expenses {
            self.apply_party(&mut ledger, expense.payer, expense.amount);
        }

        // Splits are global: most of them belong to other occasions
        let skipped_splits = splits
            .iter()
            .filter(|split| !ledger.apply(split.person_id, -split.amount))
            .count();

        for settlement in settlements {
            self.apply_party(&mut ledger, settlement.from, settlement.amount);
            self.apply_party(&mut ledger, settlement.to, -settlement.amount);
        }

        debug!(
            people = people.len(),
            expenses = expenses.len(),
            splits = splits.len(),
            skipped_splits,
            settlements = settlements.len(),
            "computed balances"
        );

        ledger.into_balances()
    }

    fn apply_party(&self, ledger: &mut Accumulator<'_>, party: Party, amount: Money) {
        match party {
            Party::Person(person_id) => {
                if !ledger.apply(person_id, amount) {
                    warn!(person = %person_id, "ignoring reference to a person outside the occasion");
                }
            }
            Party::Subgroup(subgroup_id) => match self.policy {
                SubgroupPolicy::Ignore => {
                    warn!(subgroup = %subgroup_id, %amount, "subgroup amount not attributed to anyone");
                }
                SubgroupPolicy::SplitAmongMembers => {
                    let Some(subgroup) = self.subgroups.iter().find(|s| s.id == subgroup_id) else {
                        warn!(subgroup = %subgroup_id, "ignoring reference to an unknown subgroup");
                        return;
                    };

                    if subgroup.members.is_empty() {
                        warn!(subgroup = %subgroup.name, "subgroup has no members to attribute to");
                    }

                    let shares = amount.split_evenly(subgroup.members.len());
                    for (&member, share) in subgroup.members.iter().zip(shares) {
                        if !ledger.apply(member, share) {
                            warn!(
                                subgroup = %subgroup.name,
                                person = %member,
                                "ignoring subgroup member outside the occasion"
                            );
                        }
                    }
                }
            },
        }
    }
}

/// Compute balances with subgroup references ignored
pub fn compute_balances(
    people: &[Person],
    expenses: &[Expense],
    splits: &[ExpenseSplit],
    settlements: &[Settlement],
) -> Vec<Balance> {
    BalanceCalculator::default().compute(people, expenses, splits, settlements)
}

/// Running totals keyed by person, in input order
struct Accumulator<'p> {
    people: &'p [Person],
    index: HashMap<PersonId, usize>,
    amounts: Vec<Money>,
}

impl<'p> Accumulator<'p> {
    fn new(people: &'p [Person]) -> Self {
        let mut index = HashMap::with_capacity(people.len());
        for (idx, person) in people.iter().enumerate() {
            index.entry(person.id).or_insert(idx);
        }

        Self {
            people,
            index,
            amounts: vec![Money::zero(); people.len()],
        }
    }

    /// Add `amount` to a person's total; false if the person is unknown
    fn apply(&mut self, person_id: PersonId, amount: Money) -> bool {
        match self.index.get(&person_id) {
            Some(&idx) => {
                self.amounts[idx] += amount;
                true
            }
            None => false,
        }
    }

    fn into_balances(self) -> Vec<Balance> {
        let mut balances: Vec<Balance> = self
            .people
            .iter()
            .zip(self.amounts)
            .map(|(person, amount)| Balance {
                person_id: person.id,
                person_name: person.name.clone(),
                amount,
            })
            .collect();

        // sort_by is stable, so ties keep input order
        balances.sort_by(|a, b| b.amount.cmp(&a.amount));
        balances
    }
}
