//! Storage layer
//!
//! One JSON file per record type under `data/`, written atomically, plus the
//! audit log. [`Storage`] is also the [`LedgerSource`] the settlement engine
//! reads its snapshots from.

pub mod expenses;
pub mod file_io;
pub mod init;
pub mod occasions;
pub mod people;
pub mod repository;
pub mod settlements;
pub mod splits;
pub mod subgroups;

pub use expenses::ExpenseRepository;
pub use init::initialize_storage;
pub use occasions::OccasionRepository;
pub use people::PersonRepository;
pub use repository::{Record, Repository};
pub use settlements::SettlementRepository;
pub use splits::SplitRepository;
pub use subgroups::SubgroupRepository;

use chrono::NaiveDate;
use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FairsharePaths;
use crate::engine::LedgerSource;
use crate::error::{FairshareError, FairshareResult};
use crate::models::{
    Expense, ExpenseSplit, Money, OccasionId, Party, Person, Settlement, Subgroup,
};

/// Aggregates the repositories and the audit log
pub struct Storage {
    paths: FairsharePaths,
    audit: AuditLogger,
    pub occasions: OccasionRepository,
    pub people: PersonRepository,
    pub subgroups: SubgroupRepository,
    pub expenses: ExpenseRepository,
    pub splits: SplitRepository,
    pub settlements: SettlementRepository,
}

impl Storage {
    /// Create a storage instance; call [`Storage::load_all`] before use
    pub fn new(paths: FairsharePaths) -> FairshareResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            occasions: OccasionRepository::new(paths.occasions_file()),
            people: PersonRepository::new(paths.people_file()),
            subgroups: SubgroupRepository::new(paths.subgroups_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            splits: SplitRepository::new(paths.splits_file()),
            settlements: SettlementRepository::new(paths.settlements_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &FairsharePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> FairshareResult<()> {
        self.occasions.load()?;
        self.people.load()?;
        self.subgroups.load()?;
        self.expenses.load()?;
        self.splits.load()?;
        self.settlements.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> FairshareResult<()> {
        self.occasions.save()?;
        self.people.save()?;
        self.subgroups.save()?;
        self.expenses.save()?;
        self.splits.save()?;
        self.settlements.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FairshareResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> FairshareResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FairshareResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Log several entries at once (cascading deletes)
    pub fn log_batch(&self, entries: &[AuditEntry]) -> FairshareResult<()> {
        self.audit.log_batch(entries)
    }
}

impl LedgerSource for Storage {
    fn list_people(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Person>> {
        self.people.get_by_occasion(occasion_id)
    }

    fn list_subgroups(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Subgroup>> {
        self.subgroups.get_by_occasion(occasion_id)
    }

    fn list_expenses(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Expense>> {
        self.expenses.get_by_occasion(occasion_id)
    }

    fn list_all_expense_splits(&self) -> FairshareResult<Vec<ExpenseSplit>> {
        self.splits.get_all()
    }

    fn list_settlements(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Settlement>> {
        self.settlements.get_by_occasion(occasion_id)
    }

    fn record_settlement(
        &self,
        occasion_id: OccasionId,
        from: Party,
        to: Party,
        amount: Money,
        date: NaiveDate,
    ) -> FairshareResult<Settlement> {
        let settlement = Settlement::new(occasion_id, from, to, amount, date);
        settlement
            .validate()
            .map_err(|e| FairshareError::Validation(e.to_string()))?;

        self.settlements.upsert(settlement.clone())?;
        self.settlements.save()?;

        self.log_create(
            EntityType::Settlement,
            settlement.id.to_string(),
            Some(settlement.amount.to_string()),
            &settlement,
        )?;

        Ok(settlement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{LedgerSnapshot, SubgroupPolicy};
    use crate::models::PersonId;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FairsharePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();
        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.occasions.count().unwrap(), 0);
    }

    #[test]
    fn test_record_settlement_persists_and_audits() {
        let (temp_dir, storage) = create_test_storage();
        let occasion = OccasionId::new();
        let alice = Person::new(occasion, "Alice");
        let bob = Person::new(occasion, "Bob");
        storage.people.upsert(alice.clone()).unwrap();
        storage.people.upsert(bob.clone()).unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        storage
            .record_settlement(
                occasion,
                Party::Person(bob.id),
                Party::Person(alice.id),
                Money::from_cents(1000),
                date,
            )
            .unwrap();

        let reopened = Storage::new(FairsharePaths::with_base_dir(temp_dir.path().to_path_buf()))
            .unwrap();
        reopened.load_all().unwrap();
        assert_eq!(reopened.list_settlements(occasion).unwrap().len(), 1);
        assert_eq!(reopened.audit().read_all().unwrap().len(), 1);

        let snapshot = LedgerSnapshot::fetch(&storage, occasion).unwrap();
        let balances = snapshot.balances(SubgroupPolicy::Ignore);
        assert_eq!(balances[0].person_id, bob.id);
        assert_eq!(balances[0].amount, Money::from_cents(1000));
    }

    #[test]
    fn test_record_settlement_rejects_self_payment() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = Party::Person(PersonId::new());
        let result = storage.record_settlement(
            OccasionId::new(),
            alice,
            alice,
            Money::from_cents(500),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        );

        assert!(matches!(result, Err(FairshareError::Validation(_))));
        assert_eq!(storage.settlements.count().unwrap(), 0);
    }
}
