//! Expense service
//!
//! Expenses are always stored together with their equal-share splits. Any
//! change to the amount or the participants rebuilds the splits.

use chrono::{Local, NaiveDate};

use crate::audit::EntityType;
use crate::error::{FairshareError, FairshareResult};
use crate::models::{
    Expense, ExpenseId, ExpenseSplit, ExpenseValidationError, Money, OccasionId, Party, PersonId,
};
use crate::storage::Storage;
use tracing::debug;

use super::party::ensure_in_occasion;

/// Input for a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub occasion_id: OccasionId,
    pub payer: Party,
    pub amount: Money,
    pub description: String,
    pub category: Option<String>,
    pub note: Option<String>,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    /// People the expense is split among; empty means everyone
    pub participants: Vec<PersonId>,
}

impl NewExpense {
    pub fn new(
        occasion_id: OccasionId,
        payer: Party,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            occasion_id,
            payer,
            amount,
            description: description.into(),
            category: None,
            note: None,
            date: None,
            participants: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_participants(mut self, participants: Vec<PersonId>) -> Self {
        self.participants = participants;
        self
    }
}

/// Fields to change on an existing expense
#[derive(Debug, Clone, Default)]
pub struct ExpenseChanges {
    pub payer: Option<Party>,
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub category: Option<String>,
    /// An empty note clears it
    pub note: Option<String>,
    pub date: Option<NaiveDate>,
    pub participants: Option<Vec<PersonId>>,
}

impl ExpenseChanges {
    pub fn is_empty(&self) -> bool {
        self.payer.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.note.is_none()
            && self.date.is_none()
            && self.participants.is_none()
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Deduplicate participants, falling back to everyone in the occasion
    fn participants(
        &self,
        occasion_id: OccasionId,
        requested: &[PersonId],
    ) -> FairshareResult<Vec<PersonId>> {
        if requested.is_empty() {
            let everyone: Vec<PersonId> = self
                .storage
                .people
                .get_by_occasion(occasion_id)?
                .into_iter()
                .map(|p| p.id)
                .collect();
            if everyone.is_empty() {
                return Err(FairshareError::Validation(
                    ExpenseValidationError::NoParticipants.to_string(),
                ));
            }
            return Ok(everyone);
        }

        let mut participants = Vec::with_capacity(requested.len());
        for &person_id in requested {
            ensure_in_occasion(self.storage, occasion_id, Party::Person(person_id))?;
            if !participants.contains(&person_id) {
                participants.push(person_id);
            }
        }
        Ok(participants)
    }

    /// Add an expense and split it equally among its participants
    pub fn add(&self, new: NewExpense) -> FairshareResult<(Expense, Vec<ExpenseSplit>)> {
        if self.storage.occasions.get(new.occasion_id)?.is_none() {
            return Err(FairshareError::occasion_not_found(new.occasion_id.to_string()));
        }
        ensure_in_occasion(self.storage, new.occasion_id, new.payer)?;
        let participants = self.participants(new.occasion_id, &new.participants)?;

        let date = new.date.unwrap_or_else(|| Local::now().date_naive());
        let mut expense = Expense::new(
            new.occasion_id,
            new.payer,
            new.amount,
            new.description.trim(),
            date,
        );
        if let Some(category) = new.category {
            expense.category = category.trim().to_string();
        }
        expense.note = new.note.filter(|n| !n.trim().is_empty());
        expense
            .validate()
            .map_err(|e| FairshareError::Validation(e.to_string()))?;

        let splits = expense.equal_splits(&participants);

        self.storage.expenses.upsert(expense.clone())?;
        for split in &splits {
            self.storage.splits.upsert(split.clone())?;
        }
        self.storage.expenses.save()?;
        self.storage.splits.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        debug!(expense = %expense.id, amount = %expense.amount, splits = splits.len(), "added expense");
        Ok((expense, splits))
    }

    /// Expenses of an occasion, newest first
    pub fn list(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses.get_by_occasion(occasion_id)?;
        expenses.reverse();
        Ok(expenses)
    }

    pub fn get(&self, id: ExpenseId) -> FairshareResult<Expense> {
        self.storage
            .expenses
            .get(id)?
            .ok_or_else(|| FairshareError::expense_not_found(id.to_string()))
    }

    /// Find an expense of the occasion by ID
    pub fn resolve(&self, occasion_id: OccasionId, identifier: &str) -> FairshareResult<Expense> {
        self.storage
            .expenses
            .find(|e| e.occasion_id == occasion_id && e.id.matches(identifier))?
            .ok_or_else(|| FairshareError::expense_not_found(identifier))
    }

    /// Splits of an expense in the order the occasion's people were added
    pub fn splits(&self, expense: &Expense) -> FairshareResult<Vec<ExpenseSplit>> {
        let people = self.storage.people.get_by_occasion(expense.occasion_id)?;
        let mut splits = self.storage.splits.get_by_expense(expense.id)?;
        splits.sort_by_key(|split| {
            people
                .iter()
                .position(|p| p.id == split.person_id)
                .unwrap_or(usize::MAX)
        });
        Ok(splits)
    }

    /// Apply changes to an expense, re-splitting it when the amount or the
    /// participants change
    pub fn edit(
        &self,
        id: ExpenseId,
        changes: ExpenseChanges,
    ) -> FairshareResult<(Expense, Vec<ExpenseSplit>)> {
        let mut expense = self.get(id)?;
        let before = expense.clone();

        if let Some(payer) = changes.payer {
            ensure_in_occasion(self.storage, expense.occasion_id, payer)?;
            expense.payer = payer;
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(description) = changes.description {
            expense.description = description.trim().to_string();
        }
        if let Some(category) = changes.category {
            expense.category = category.trim().to_string();
        }
        if let Some(note) = changes.note {
            expense.note = Some(note.trim().to_string()).filter(|n| !n.is_empty());
        }
        if let Some(date) = changes.date {
            expense.date = date;
        }
        expense
            .validate()
            .map_err(|e| FairshareError::Validation(e.to_string()))?;

        let resplit = changes.participants.is_some() || expense.amount != before.amount;
        let splits = if resplit {
            let participants = match &changes.participants {
                Some(requested) => self.participants(expense.occasion_id, requested)?,
                None => self
                    .splits(&before)?
                    .into_iter()
                    .map(|split| split.person_id)
                    .collect(),
            };
            if participants.is_empty() {
                return Err(FairshareError::Validation(
                    ExpenseValidationError::NoParticipants.to_string(),
                ));
            }

            let splits = expense.equal_splits(&participants);
            self.storage.splits.delete_by_expense(expense.id)?;
            for split in &splits {
                self.storage.splits.upsert(split.clone())?;
            }
            splits
        } else {
            self.splits(&expense)?
        };

        expense.touch();
        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;
        self.storage.splits.save()?;

        self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &before,
            &expense,
        )?;

        debug!(expense = %expense.id, resplit, "edited expense");
        Ok((expense, splits))
    }

    /// Delete an expense and its splits
    pub fn delete(&self, id: ExpenseId) -> FairshareResult<Expense> {
        let expense = self.get(id)?;

        self.storage.splits.delete_by_expense(id)?;
        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;
        self.storage.splits.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::FairsharePaths;
    use crate::models::Person;
    use crate::services::{OccasionService, PersonService, SubgroupService};
    use tempfile::TempDir;

    struct Trip {
        _temp_dir: TempDir,
        storage: Storage,
        occasion: OccasionId,
        people: Vec<Person>,
    }

    fn trip() -> Trip {
        let temp_dir = TempDir::new().unwrap();
        let paths = FairsharePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let occasion = OccasionService::new(&storage).create("Trip").unwrap().id;
        let people = ["Alice", "Bob", "Carol"]
            .iter()
            .map(|name| PersonService::new(&storage).add(occasion, name).unwrap())
            .collect();
        Trip {
            _temp_dir: temp_dir,
            storage,
            occasion,
            people,
        }
    }

    fn cents(splits: &[ExpenseSplit]) -> Vec<i64> {
        splits.iter().map(|s| s.amount.cents()).collect()
    }

    #[test]
    fn test_add_splits_among_everyone() {
        let t = trip();
        let service = ExpenseService::new(&t.storage);
        let alice = Party::Person(t.people[0].id);

        let (expense, splits) = service
            .add(NewExpense::new(t.occasion, alice, Money::from_cents(1000), " Lunch "))
            .unwrap();

        assert_eq!(expense.description, "Lunch");
        assert_eq!(expense.category, "General");
        assert_eq!(cents(&splits), vec![334, 333, 333]);
        assert_eq!(cents(&service.splits(&expense).unwrap()), vec![334, 333, 333]);
    }

    #[test]
    fn test_add_with_selected_participants() {
        let t = trip();
        let service = ExpenseService::new(&t.storage);
        let bob = t.people[1].id;
        let carol = t.people[2].id;

        let (_, splits) = service
            .add(
                NewExpense::new(t.occasion, Party::Person(bob), Money::from_cents(901), "Taxi")
                    .with_category("Transport")
                    .with_participants(vec![carol, bob, carol]),
            )
            .unwrap();

        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].person_id, carol);
        assert_eq!(cents(&splits), vec![451, 450]);
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let t = trip();
        let service = ExpenseService::new(&t.storage);
        let alice = Party::Person(t.people[0].id);

        let zero = service.add(NewExpense::new(t.occasion, alice, Money::zero(), "Nothing"));
        assert!(zero.unwrap_err().is_validation());

        let stranger = Party::Person(PersonId::new());
        let unknown = service.add(NewExpense::new(t.occasion, stranger, Money::from_cents(100), "X"));
        assert!(unknown.unwrap_err().is_not_found());

        let outsider = service.add(
            NewExpense::new(t.occasion, alice, Money::from_cents(100), "X")
                .with_participants(vec![PersonId::new()]),
        );
        assert!(outsider.unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_paid_by_subgroup() {
        let t = trip();
        let couple = SubgroupService::new(&t.storage)
            .create(t.occasion, "Couple", &[t.people[0].id, t.people[1].id])
            .unwrap();

        let (expense, splits) = ExpenseService::new(&t.storage)
            .add(NewExpense::new(
                t.occasion,
                Party::Subgroup(couple.id),
                Money::from_cents(1200),
                "Museum",
            ))
            .unwrap();

        assert_eq!(expense.payer, Party::Subgroup(couple.id));
        assert_eq!(splits.len(), 3);
    }

    #[test]
    fn test_edit_resplits_on_amount_change() {
        let t = trip();
        let service = ExpenseService::new(&t.storage);
        let alice = t.people[0].id;
        let bob = t.people[1].id;
        let (expense, _) = service
            .add(
                NewExpense::new(t.occasion, Party::Person(alice), Money::from_cents(1000), "Lunch")
                    .with_participants(vec![alice, bob]),
            )
            .unwrap();

        let (edited, splits) = service
            .edit(
                expense.id,
                ExpenseChanges {
                    amount: Some(Money::from_cents(1201)),
                    ..ExpenseChanges::default()
                },
            )
            .unwrap();

        assert_eq!(edited.amount.cents(), 1201);
        assert_eq!(cents(&splits), vec![601, 600]);
        assert_eq!(t.storage.splits.count().unwrap(), 2);
    }

    #[test]
    fn test_edit_participants_and_note() {
        let t = trip();
        let service = ExpenseService::new(&t.storage);
        let alice = t.people[0].id;
        let (expense, _) = service
            .add(
                NewExpense::new(t.occasion, Party::Person(alice), Money::from_cents(900), "Lunch")
                    .with_note("cash"),
            )
            .unwrap();

        let (edited, splits) = service
            .edit(
                expense.id,
                ExpenseChanges {
                    participants: Some(vec![t.people[2].id]),
                    note: Some(String::new()),
                    ..ExpenseChanges::default()
                },
            )
            .unwrap();

        assert!(edited.note.is_none());
        assert_eq!(cents(&splits), vec![900]);
        assert_eq!(t.storage.splits.count().unwrap(), 1);
    }

    #[test]
    fn test_list_newest_first_and_delete() {
        let t = trip();
        let service = ExpenseService::new(&t.storage);
        let alice = Party::Person(t.people[0].id);
        let day = |d| NaiveDate::from_ymd_opt(2026, 6, d).unwrap();

        let (first, _) = service
            .add(NewExpense::new(t.occasion, alice, Money::from_cents(100), "First").with_date(day(1)))
            .unwrap();
        service
            .add(NewExpense::new(t.occasion, alice, Money::from_cents(200), "Second").with_date(day(2)))
            .unwrap();

        let listed: Vec<String> = service
            .list(t.occasion)
            .unwrap()
            .into_iter()
            .map(|e| e.description)
            .collect();
        assert_eq!(listed, vec!["Second", "First"]);

        service.delete(first.id).unwrap();
        assert_eq!(t.storage.expenses.count().unwrap(), 1);
        assert_eq!(t.storage.splits.count().unwrap(), 3);
        assert!(service.get(first.id).unwrap_err().is_not_found());

        let entries = t.storage.audit().read_all().unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.operation, Operation::Delete);
        assert_eq!(last.entity_type, EntityType::Expense);
        assert_eq!(last.entity_name.as_deref(), Some("First"));
    }
}
