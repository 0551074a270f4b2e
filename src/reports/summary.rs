//! Per-party summary
//!
//! What a person (or every member of a subgroup together) paid, owes and
//! settled within one occasion.

use std::collections::HashSet;

use crate::engine::LedgerSnapshot;
use crate::error::{FairshareError, FairshareResult};
use crate::models::{Money, Party, PersonId};
use crate::services::PartyNames;

#[derive(Debug, Clone, PartialEq)]
pub struct PartySummary {
    pub party: Party,
    pub name: String,
    /// Members counted; a single entry for a person
    pub members: Vec<String>,
    pub total_paid: Money,
    pub expenses_paid: usize,
    /// Sum of the splits charged to the party
    pub total_share: Money,
    pub settlements_paid: Money,
    pub settlements_received: Money,
}

impl PartySummary {
    /// Summarize a party of the snapshot.
    ///
    /// For a subgroup, expenses and settlements of the subgroup itself count
    /// along with those of its members. Settlements between two members
    /// appear on both sides and cancel out in the net.
    pub fn generate(snapshot: &LedgerSnapshot, party: Party) -> FairshareResult<Self> {
        let names = PartyNames::new(&snapshot.people, &snapshot.subgroups);

        let members: Vec<PersonId> = match party {
            Party::Person(id) => {
                if !snapshot.people.iter().any(|p| p.id == id) {
                    return Err(FairshareError::person_not_found(id.to_string()));
                }
                vec![id]
            }
            Party::Subgroup(id) => snapshot
                .subgroups
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.members.clone())
                .ok_or_else(|| FairshareError::subgroup_not_found(id.to_string()))?,
        };

        let counted: HashSet<Party> = members
            .iter()
            .map(|&id| Party::Person(id))
            .chain(std::iter::once(party))
            .collect();
        let member_ids: HashSet<PersonId> = members.iter().copied().collect();
        let expense_ids: HashSet<_> = snapshot.expenses.iter().map(|e| e.id).collect();

        let paid: Vec<Money> = snapshot
            .expenses
            .iter()
            .filter(|e| counted.contains(&e.payer))
            .map(|e| e.amount)
            .collect();

        let total_share = snapshot
            .splits
            .iter()
            .filter(|s| member_ids.contains(&s.person_id) && expense_ids.contains(&s.expense_id))
            .map(|s| s.amount)
            .sum();

        let settlements_paid = snapshot
            .settlements
            .iter()
            .filter(|s| counted.contains(&s.from))
            .map(|s| s.amount)
            .sum();
        let settlements_received = snapshot
            .settlements
            .iter()
            .filter(|s| counted.contains(&s.to))
            .map(|s| s.amount)
            .sum();

        Ok(Self {
            party,
            name: names.name(party),
            members: members
                .iter()
                .map(|&id| names.name(Party::Person(id)))
                .collect(),
            expenses_paid: paid.len(),
            total_paid: paid.into_iter().sum(),
            total_share,
            settlements_paid,
            settlements_received,
        })
    }

    /// Paid minus share, adjusted by settlements
    pub fn net_balance(&self) -> Money {
        self.total_paid - self.total_share + self.settlements_paid - self.settlements_received
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!("Summary: {}\n", self.name));
        if self.party.subgroup().is_some() {
            output.push_str(&format!("Members: {}\n", self.members.join(", ")));
        }
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>14}\n",
            format!("Paid ({} expenses)", self.expenses_paid),
            money(self.total_paid)
        ));
        output.push_str(&format!("{:<24} {:>14}\n", "Share of expenses", money(self.total_share)));
        output.push_str(&format!("{:<24} {:>14}\n", "Settlements paid", money(self.settlements_paid)));
        output.push_str(&format!(
            "{:<24} {:>14}\n",
            "Settlements received",
            money(self.settlements_received)
        ));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<24} {:>14}\n", "Net balance", money(self.net_balance())));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SubgroupPolicy;
    use crate::models::{Expense, OccasionId, Person, Settlement, Subgroup};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 12).unwrap()
    }

    fn snapshot() -> LedgerSnapshot {
        let occasion = OccasionId::new();
        let alice = Person::new(occasion, "Alice");
        let bob = Person::new(occasion, "Bob");
        let carol = Person::new(occasion, "Carol");
        let couple = Subgroup::with_members(occasion, "Couple", [alice.id, bob.id]);
        let everyone = [alice.id, bob.id, carol.id];

        let hotel = Expense::new(occasion, Party::Person(alice.id), Money::from_cents(9000), "Hotel", date());
        let taxi = Expense::new(occasion, Party::Person(carol.id), Money::from_cents(3000), "Taxi", date());
        let mut splits = hotel.equal_splits(&everyone);
        splits.extend(taxi.equal_splits(&everyone));

        let settlements = vec![
            Settlement::new(occasion, Party::Person(bob.id), Party::Person(alice.id), Money::from_cents(1000), date()),
            Settlement::new(occasion, Party::Person(carol.id), Party::Person(alice.id), Money::from_cents(2000), date()),
        ];

        LedgerSnapshot {
            people: vec![alice, bob, carol],
            subgroups: vec![couple],
            expenses: vec![hotel, taxi],
            splits,
            settlements,
        }
    }

    #[test]
    fn test_person_summary_matches_balance() {
        let snapshot = snapshot();
        let alice = snapshot.people[0].id;

        let summary = PartySummary::generate(&snapshot, Party::Person(alice)).unwrap();

        assert_eq!(summary.total_paid.cents(), 9000);
        assert_eq!(summary.expenses_paid, 1);
        assert_eq!(summary.total_share.cents(), 4000);
        assert_eq!(summary.settlements_received.cents(), 3000);
        assert_eq!(summary.net_balance().cents(), 2000);

        let balance = snapshot
            .balances(SubgroupPolicy::Ignore)
            .into_iter()
            .find(|b| b.person_id == alice)
            .unwrap();
        assert_eq!(balance.amount, summary.net_balance());
    }

    #[test]
    fn test_subgroup_summary_aggregates_members() {
        let snapshot = snapshot();
        let couple = snapshot.subgroups[0].id;

        let summary = PartySummary::generate(&snapshot, Party::Subgroup(couple)).unwrap();

        assert_eq!(summary.members, vec!["Alice", "Bob"]);
        assert_eq!(summary.total_paid.cents(), 9000);
        assert_eq!(summary.total_share.cents(), 8000);
        // Bob paying Alice is internal to the couple
        assert_eq!(summary.settlements_paid.cents(), 1000);
        assert_eq!(summary.settlements_received.cents(), 3000);
        assert_eq!(summary.net_balance().cents(), -1000);
        assert!(summary.format_terminal("$").contains("Members: Alice, Bob"));
    }

    #[test]
    fn test_unknown_party() {
        let snapshot = snapshot();
        assert!(PartySummary::generate(&snapshot, Party::Person(PersonId::new()))
            .unwrap_err()
            .is_not_found());
    }
}
