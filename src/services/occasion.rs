//! Occasion service
//!
//! Creating, renaming and deleting occasions. Deleting an occasion removes
//! everything it owns.

use crate::audit::{AuditEntry, EntityType};
use crate::config::settings::Settings;
use crate::error::{FairshareError, FairshareResult};
use crate::models::{Occasion, OccasionId};
use crate::storage::Storage;
use tracing::debug;

/// Service for occasion management
pub struct OccasionService<'a> {
    storage: &'a Storage,
}

/// Records removed by a cascading delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovedRecords {
    pub people: usize,
    pub subgroups: usize,
    pub expenses: usize,
    pub splits: usize,
    pub settlements: usize,
}

impl<'a> OccasionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new occasion with a unique name
    pub fn create(&self, name: &str) -> FairshareResult<Occasion> {
        let name = name.trim();
        if self.storage.occasions.name_exists(name, None)? {
            return Err(FairshareError::Duplicate {
                entity_type: "Occasion",
                identifier: name.to_string(),
            });
        }

        let occasion = Occasion::new(name);
        occasion
            .validate()
            .map_err(|e| FairshareError::Validation(e.to_string()))?;

        self.storage.occasions.upsert(occasion.clone())?;
        self.storage.occasions.save()?;

        self.storage.log_create(
            EntityType::Occasion,
            occasion.id.to_string(),
            Some(occasion.name.clone()),
            &occasion,
        )?;

        Ok(occasion)
    }

    /// All occasions, oldest first
    pub fn list(&self) -> FairshareResult<Vec<Occasion>> {
        self.storage.occasions.get_all()
    }

    /// Find an occasion by name or ID
    pub fn find(&self, identifier: &str) -> FairshareResult<Option<Occasion>> {
        if let Some(occasion) = self.storage.occasions.get_by_name(identifier)? {
            return Ok(Some(occasion));
        }
        self.storage
            .occasions
            .find(|occasion| occasion.id.matches(identifier))
    }

    /// Find an occasion or fail with a not-found error
    pub fn resolve(&self, identifier: &str) -> FairshareResult<Occasion> {
        self.find(identifier)?
            .ok_or_else(|| FairshareError::occasion_not_found(identifier))
    }

    /// The occasion commands operate on: `identifier` if given, otherwise the
    /// one selected in settings
    pub fn current(
        &self,
        identifier: Option<&str>,
        settings: &Settings,
    ) -> FairshareResult<Occasion> {
        if let Some(identifier) = identifier {
            return self.resolve(identifier);
        }

        let id = settings
            .active_occasion
            .ok_or(FairshareError::NoActiveOccasion)?;
        self.storage
            .occasions
            .get(id)?
            .ok_or(FairshareError::NoActiveOccasion)
    }

    pub fn rename(&self, id: OccasionId, name: &str) -> FairshareResult<Occasion> {
        let mut occasion = self
            .storage
            .occasions
            .get(id)?
            .ok_or_else(|| FairshareError::occasion_not_found(id.to_string()))?;
        let before = occasion.clone();

        let name = name.trim();
        if self.storage.occasions.name_exists(name, Some(id))? {
            return Err(FairshareError::Duplicate {
                entity_type: "Occasion",
                identifier: name.to_string(),
            });
        }

        occasion.rename(name);
        occasion
            .validate()
            .map_err(|e| FairshareError::Validation(e.to_string()))?;

        self.storage.occasions.upsert(occasion.clone())?;
        self.storage.occasions.save()?;

        self.storage.log_update(
            EntityType::Occasion,
            occasion.id.to_string(),
            Some(occasion.name.clone()),
            &before,
            &occasion,
        )?;

        Ok(occasion)
    }

    /// Delete an occasion together with everything recorded in it
    pub fn delete(&self, id: OccasionId) -> FairshareResult<RemovedRecords> {
        let occasion = self
            .storage
            .occasions
            .get(id)?
            .ok_or_else(|| FairshareError::occasion_not_found(id.to_string()))?;

        let people = self.storage.people.delete_by_occasion(id)?;
        let subgroups = self.storage.subgroups.delete_by_occasion(id)?;
        let expenses = self.storage.expenses.delete_by_occasion(id)?;
        let mut splits = 0;
        for expense in &expenses {
            splits += self.storage.splits.delete_by_expense(expense.id)?.len();
        }
        let settlements = self.storage.settlements.delete_by_occasion(id)?;
        self.storage.occasions.delete(id)?;
        self.storage.save_all()?;

        let mut entries = Vec::new();
        entries.extend(people.iter().map(|p| {
            AuditEntry::delete(EntityType::Person, p.id.to_string(), Some(p.name.clone()), p)
        }));
        entries.extend(subgroups.iter().map(|s| {
            AuditEntry::delete(EntityType::Subgroup, s.id.to_string(), Some(s.name.clone()), s)
        }));
        entries.extend(expenses.iter().map(|e| {
            AuditEntry::delete(
                EntityType::Expense,
                e.id.to_string(),
                Some(e.description.clone()),
                e,
            )
        }));
        entries.extend(settlements.iter().map(|s| {
            AuditEntry::delete(EntityType::Settlement, s.id.to_string(), None, s)
        }));
        entries.push(AuditEntry::delete(
            EntityType::Occasion,
            occasion.id.to_string(),
            Some(occasion.name.clone()),
            &occasion,
        ));
        self.storage.log_batch(&entries)?;

        let removed = RemovedRecords {
            people: people.len(),
            subgroups: subgroups.len(),
            expenses: expenses.len(),
            splits,
            settlements: settlements.len(),
        };
        debug!(occasion = %occasion.name, ?removed, "deleted occasion");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FairsharePaths;
    use crate::models::{Money, Party};
    use crate::services::{ExpenseService, NewExpense, PersonService};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FairsharePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = OccasionService::new(&storage);

        let created = service.create("  Lisbon 2026 ").unwrap();
        assert_eq!(created.name, "Lisbon 2026");

        assert_eq!(service.find("lisbon 2026").unwrap().unwrap().id, created.id);
        assert_eq!(service.resolve(&created.id.to_string()).unwrap().id, created.id);
        assert!(service.resolve("Porto").unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_and_empty_names() {
        let (_temp_dir, storage) = create_test_storage();
        let service = OccasionService::new(&storage);
        service.create("Ski Trip").unwrap();

        assert!(matches!(
            service.create("ski trip"),
            Err(FairshareError::Duplicate { .. })
        ));
        assert!(service.create("   ").unwrap_err().is_validation());
    }

    #[test]
    fn test_rename() {
        let (_temp_dir, storage) = create_test_storage();
        let service = OccasionService::new(&storage);
        let occasion = service.create("Trip").unwrap();
        service.create("Dinner").unwrap();

        assert!(service.rename(occasion.id, "Dinner").is_err());
        let renamed = service.rename(occasion.id, "Road Trip").unwrap();
        assert_eq!(renamed.name, "Road Trip");

        let entries = storage.audit().read_all().unwrap();
        let last = entries.last().unwrap();
        assert_eq!(
            last.diff_summary.as_deref(),
            Some(r#"name: "Trip" -> "Road Trip""#)
        );
    }

    #[test]
    fn test_current_occasion() {
        let (_temp_dir, storage) = create_test_storage();
        let service = OccasionService::new(&storage);
        let occasion = service.create("Trip").unwrap();
        let mut settings = Settings::default();

        assert!(matches!(
            service.current(None, &settings),
            Err(FairshareError::NoActiveOccasion)
        ));

        settings.active_occasion = Some(occasion.id);
        assert_eq!(service.current(None, &settings).unwrap().id, occasion.id);
        assert!(service.current(Some("Other"), &settings).is_err());
    }

    #[test]
    fn test_delete_cascades() {
        let (_temp_dir, storage) = create_test_storage();
        let service = OccasionService::new(&storage);
        let trip = service.create("Trip").unwrap();
        let other = service.create("Other").unwrap();

        let people = PersonService::new(&storage);
        let alice = people.add(trip.id, "Alice").unwrap();
        people.add(trip.id, "Bob").unwrap();
        people.add(other.id, "Carol").unwrap();

        ExpenseService::new(&storage)
            .add(NewExpense::new(
                trip.id,
                Party::Person(alice.id),
                Money::from_cents(2000),
                "Dinner",
            ))
            .unwrap();

        let removed = service.delete(trip.id).unwrap();

        assert_eq!(
            removed,
            RemovedRecords {
                people: 2,
                subgroups: 0,
                expenses: 1,
                splits: 2,
                settlements: 0,
            }
        );
        assert_eq!(storage.people.count().unwrap(), 1);
        assert_eq!(storage.splits.count().unwrap(), 0);
        assert!(storage.occasions.get(other.id).unwrap().is_some());
    }
}
