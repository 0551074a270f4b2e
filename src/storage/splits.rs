//! Expense split repository (`splits.json`)

use crate::error::FairshareResult;
use crate::models::{ExpenseId, ExpenseSplit, PersonId, SplitId};

use super::repository::{Record, Repository};

impl Record for ExpenseSplit {
    type Id = SplitId;
    type SortKey = (ExpenseId, SplitId);

    fn id(&self) -> SplitId {
        self.id
    }

    fn sort_key(&self) -> Self::SortKey {
        (self.expense_id, self.id)
    }
}

pub type SplitRepository = Repository<ExpenseSplit>;

impl Repository<ExpenseSplit> {
    pub fn get_by_expense(&self, expense_id: ExpenseId) -> FairshareResult<Vec<ExpenseSplit>> {
        self.filter(|split| split.expense_id == expense_id)
    }

    pub fn get_by_person(&self, person_id: PersonId) -> FairshareResult<Vec<ExpenseSplit>> {
        self.filter(|split| split.person_id == person_id)
    }

    /// Remove the splits of an expense
    pub fn delete_by_expense(&self, expense_id: ExpenseId) -> FairshareResult<Vec<ExpenseSplit>> {
        self.delete_where(|split| split.expense_id == expense_id)
    }

    pub fn delete_by_person(&self, person_id: PersonId) -> FairshareResult<Vec<ExpenseSplit>> {
        self.delete_where(|split| split.person_id == person_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_by_expense() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SplitRepository::new(temp_dir.path().join("splits.json"));
        let dinner = ExpenseId::new();
        let taxi = ExpenseId::new();
        let alice = PersonId::new();

        repo.upsert(ExpenseSplit::new(dinner, alice, Money::from_cents(500))).unwrap();
        repo.upsert(ExpenseSplit::new(dinner, PersonId::new(), Money::from_cents(500))).unwrap();
        repo.upsert(ExpenseSplit::new(taxi, alice, Money::from_cents(300))).unwrap();

        assert_eq!(repo.get_by_expense(dinner).unwrap().len(), 2);
        assert_eq!(repo.get_by_person(alice).unwrap().len(), 2);

        let removed = repo.delete_by_expense(dinner).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.get_by_expense(dinner).unwrap().is_empty());
    }
}
