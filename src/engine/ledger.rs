//! Data-access port and the snapshot the engine computes over

use chrono::NaiveDate;

use super::balance::{Balance, BalanceCalculator};
use super::integrity::{self, IntegrityIssue};
use super::suggest::{suggest_transfers, SuggestedTransfer};
use super::SubgroupPolicy;
use crate::error::FairshareResult;
use crate::models::{
    Expense, ExpenseSplit, Money, OccasionId, Party, Person, Settlement, Subgroup,
};

/// Source of the records an occasion's balances are computed from.
///
/// Splits are not scoped to an occasion; the engine only ever looks at the
/// splits of people it was given.
pub trait LedgerSource {
    fn list_people(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Person>>;

    fn list_subgroups(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Subgroup>>;

    fn list_expenses(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Expense>>;

    fn list_all_expense_splits(&self) -> FairshareResult<Vec<ExpenseSplit>>;

    fn list_settlements(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Settlement>>;

    /// Persist a payment between two parties
    fn record_settlement(
        &self,
        occasion_id: OccasionId,
        from: Party,
        to: Party,
        amount: Money,
        date: NaiveDate,
    ) -> FairshareResult<Settlement>;
}

/// Everything recorded for one occasion, fetched at a single point in time
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub people: Vec<Person>,
    pub subgroups: Vec<Subgroup>,
    pub expenses: Vec<Expense>,
    pub splits: Vec<ExpenseSplit>,
    pub settlements: Vec<Settlement>,
}

impl LedgerSnapshot {
    /// Fetch a fresh snapshot of an occasion
    pub fn fetch<S: LedgerSource + ?Sized>(
        source: &S,
        occasion_id: OccasionId,
    ) -> FairshareResult<Self> {
        Ok(Self {
            people: source.list_people(occasion_id)?,
            subgroups: source.list_subgroups(occasion_id)?,
            expenses: source.list_expenses(occasion_id)?,
            splits: source.list_all_expense_splits()?,
            settlements: source.list_settlements(occasion_id)?,
        })
    }

    /// Net balance per person, largest creditor first
    pub fn balances(&self, policy: SubgroupPolicy) -> Vec<Balance> {
        BalanceCalculator::new(policy, &self.subgroups).compute(
            &self.people,
            &self.expenses,
            &self.splits,
            &self.settlements,
        )
    }

    /// Greedy settle-up suggestions for the current balances
    pub fn suggestions(&self, policy: SubgroupPolicy) -> Vec<SuggestedTransfer> {
        suggest_transfers(&self.balances(policy))
    }

    /// Missing references and inconsistent totals
    pub fn integrity_issues(&self, policy: SubgroupPolicy) -> Vec<IntegrityIssue> {
        integrity::check(self, policy)
    }
}
