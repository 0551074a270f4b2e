//! Expense repository (`expenses.json`)

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::FairshareResult;
use crate::models::{Expense, ExpenseId, OccasionId, Party};

use super::repository::{Record, Repository};

impl Record for Expense {
    type Id = ExpenseId;
    type SortKey = (NaiveDate, DateTime<Utc>, ExpenseId);

    fn id(&self) -> ExpenseId {
        self.id
    }

    fn sort_key(&self) -> Self::SortKey {
        (self.date, self.created_at, self.id)
    }
}

pub type ExpenseRepository = Repository<Expense>;

impl Repository<Expense> {
    /// Expenses of an occasion, oldest first
    pub fn get_by_occasion(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Expense>> {
        self.filter(|expense| expense.occasion_id == occasion_id)
    }

    /// Expenses paid by a party
    pub fn get_by_payer(&self, payer: Party) -> FairshareResult<Vec<Expense>> {
        self.filter(|expense| expense.payer == payer)
    }

    pub fn delete_by_occasion(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Expense>> {
        self.delete_where(|expense| expense.occasion_id == occasion_id)
    }
}
