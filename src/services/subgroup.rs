//! Subgroup service

use crate::audit::{AuditEntry, EntityType};
use crate::error::{FairshareError, FairshareResult};
use crate::models::{OccasionId, Party, PersonId, Subgroup, SubgroupId};
use crate::storage::Storage;
use tracing::debug;

use super::occasion::RemovedRecords;
use super::party::ensure_name_available;

/// Service for the subgroups of an occasion
pub struct SubgroupService<'a> {
    storage: &'a Storage,
}

impl<'a> SubgroupService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn ensure_member_of(&self, occasion_id: OccasionId, person_id: PersonId) -> FairshareResult<()> {
        match self.storage.people.get(person_id)? {
            Some(person) if person.occasion_id == occasion_id => Ok(()),
            _ => Err(FairshareError::person_not_found(person_id.to_string())),
        }
    }

    fn get_existing(&self, id: SubgroupId) -> FairshareResult<Subgroup> {
        self.storage
            .subgroups
            .get(id)?
            .ok_or_else(|| FairshareError::subgroup_not_found(id.to_string()))
    }

    fn save_update(&self, before: &Subgroup, subgroup: &Subgroup) -> FairshareResult<()> {
        self.storage.subgroups.upsert(subgroup.clone())?;
        self.storage.subgroups.save()?;
        self.storage.log_update(
            EntityType::Subgroup,
            subgroup.id.to_string(),
            Some(subgroup.name.clone()),
            before,
            subgroup,
        )
    }

    /// Create a subgroup with initial members
    pub fn create(
        &self,
        occasion_id: OccasionId,
        name: &str,
        members: &[PersonId],
    ) -> FairshareResult<Subgroup> {
        if self.storage.occasions.get(occasion_id)?.is_none() {
            return Err(FairshareError::occasion_not_found(occasion_id.to_string()));
        }

        let name = name.trim();
        ensure_name_available(self.storage, occasion_id, name, None)?;
        for &member in members {
            self.ensure_member_of(occasion_id, member)?;
        }

        let subgroup = Subgroup::with_members(occasion_id, name, members.iter().copied());
        subgroup
            .validate()
            .map_err(|e| FairshareError::Validation(e.to_string()))?;

        self.storage.subgroups.upsert(subgroup.clone())?;
        self.storage.subgroups.save()?;

        self.storage.log_create(
            EntityType::Subgroup,
            subgroup.id.to_string(),
            Some(subgroup.name.clone()),
            &subgroup,
        )?;

        Ok(subgroup)
    }

    pub fn list(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Subgroup>> {
        self.storage.subgroups.get_by_occasion(occasion_id)
    }

    /// Find a subgroup of the occasion by name or ID
    pub fn find(
        &self,
        occasion_id: OccasionId,
        identifier: &str,
    ) -> FairshareResult<Option<Subgroup>> {
        if let Some(subgroup) = self.storage.subgroups.get_by_name(occasion_id, identifier)? {
            return Ok(Some(subgroup));
        }
        self.storage
            .subgroups
            .find(|s| s.occasion_id == occasion_id && s.id.matches(identifier))
    }

    pub fn resolve(&self, occasion_id: OccasionId, identifier: &str) -> FairshareResult<Subgroup> {
        self.find(occasion_id, identifier)?
            .ok_or_else(|| FairshareError::subgroup_not_found(identifier))
    }

    pub fn rename(&self, id: SubgroupId, name: &str) -> FairshareResult<Subgroup> {
        let mut subgroup = self.get_existing(id)?;
        let before = subgroup.clone();

        let name = name.trim();
        ensure_name_available(
            self.storage,
            subgroup.occasion_id,
            name,
            Some(Party::Subgroup(id)),
        )?;

        subgroup.name = name.to_string();
        subgroup
            .validate()
            .map_err(|e| FairshareError::Validation(e.to_string()))?;

        self.save_update(&before, &subgroup)?;
        Ok(subgroup)
    }

    pub fn add_member(&self, id: SubgroupId, person_id: PersonId) -> FairshareResult<Subgroup> {
        let mut subgroup = self.get_existing(id)?;
        self.ensure_member_of(subgroup.occasion_id, person_id)?;
        let before = subgroup.clone();

        if !subgroup.add_member(person_id) {
            return Err(FairshareError::Duplicate {
                entity_type: "Subgroup member",
                identifier: person_id.to_string(),
            });
        }

        self.save_update(&before, &subgroup)?;
        Ok(subgroup)
    }

    pub fn remove_member(&self, id: SubgroupId, person_id: PersonId) -> FairshareResult<Subgroup> {
        let mut subgroup = self.get_existing(id)?;
        let before = subgroup.clone();

        if !subgroup.remove_member(person_id) {
            return Err(FairshareError::NotFound {
                entity_type: "Subgroup member",
                identifier: person_id.to_string(),
            });
        }

        self.save_update(&before, &subgroup)?;
        Ok(subgroup)
    }

    /// Delete a subgroup with the expenses it paid and the settlements it
    /// took part in
    pub fn delete(&self, id: SubgroupId) -> FairshareResult<RemovedRecords> {
        let subgroup = self.get_existing(id)?;
        let party = Party::Subgroup(id);

        let expenses = self.storage.expenses.delete_where(|e| e.payer == party)?;
        let mut splits = 0;
        for expense in &expenses {
            splits += self.storage.splits.delete_by_expense(expense.id)?.len();
        }
        let settlements = self.storage.settlements.delete_involving(party)?;
        self.storage.subgroups.delete(id)?;
        self.storage.save_all()?;

        let mut entries: Vec<AuditEntry> = expenses
            .iter()
            .map(|e| {
                AuditEntry::delete(
                    EntityType::Expense,
                    e.id.to_string(),
                    Some(e.description.clone()),
                    e,
                )
            })
            .collect();
        entries.extend(settlements.iter().map(|s| {
            AuditEntry::delete(EntityType::Settlement, s.id.to_string(), None, s)
        }));
        entries.push(AuditEntry::delete(
            EntityType::Subgroup,
            subgroup.id.to_string(),
            Some(subgroup.name.clone()),
            &subgroup,
        ));
        self.storage.log_batch(&entries)?;

        let removed = RemovedRecords {
            subgroups: 1,
            expenses: expenses.len(),
            splits,
            settlements: settlements.len(),
            ..RemovedRecords::default()
        };
        debug!(subgroup = %subgroup.name, ?removed, "deleted subgroup");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FairsharePaths;
    use crate::models::Money;
    use crate::services::{ExpenseService, NewExpense, OccasionService, PersonService};
    use tempfile::TempDir;

    struct Setup {
        _temp_dir: TempDir,
        storage: Storage,
    }

    fn setup() -> (Setup, OccasionId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FairsharePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let occasion = OccasionService::new(&storage).create("Trip").unwrap().id;
        (
            Setup {
                _temp_dir: temp_dir,
                storage,
            },
            occasion,
        )
    }

    #[test]
    fn test_create_with_members() {
        let (s, occasion) = setup();
        let people = PersonService::new(&s.storage);
        let alice = people.add(occasion, "Alice").unwrap();
        let bob = people.add(occasion, "Bob").unwrap();
        let service = SubgroupService::new(&s.storage);

        let couple = service.create(occasion, "Couple", &[alice.id, bob.id]).unwrap();
        assert_eq!(couple.members, vec![alice.id, bob.id]);
        assert_eq!(service.resolve(occasion, "couple").unwrap().id, couple.id);

        assert!(matches!(
            service.create(occasion, "Alice", &[]),
            Err(FairshareError::Duplicate { .. })
        ));
        assert!(service
            .create(occasion, "Strangers", &[PersonId::new()])
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_membership_changes() {
        let (s, occasion) = setup();
        let people = PersonService::new(&s.storage);
        let alice = people.add(occasion, "Alice").unwrap();
        let bob = people.add(occasion, "Bob").unwrap();
        let service = SubgroupService::new(&s.storage);
        let group = service.create(occasion, "Group", &[alice.id]).unwrap();

        let group = service.add_member(group.id, bob.id).unwrap();
        assert_eq!(group.members, vec![alice.id, bob.id]);
        assert!(service.add_member(group.id, bob.id).is_err());

        let group = service.remove_member(group.id, alice.id).unwrap();
        assert_eq!(group.members, vec![bob.id]);
        assert!(service.remove_member(group.id, alice.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_cascades() {
        let (s, occasion) = setup();
        let people = PersonService::new(&s.storage);
        let alice = people.add(occasion, "Alice").unwrap();
        let bob = people.add(occasion, "Bob").unwrap();
        let service = SubgroupService::new(&s.storage);
        let group = service.create(occasion, "Group", &[alice.id, bob.id]).unwrap();

        ExpenseService::new(&s.storage)
            .add(NewExpense::new(
                occasion,
                Party::Subgroup(group.id),
                Money::from_cents(1000),
                "Groceries",
            ))
            .unwrap();

        let removed = service.delete(group.id).unwrap();
        assert_eq!(removed.expenses, 1);
        assert_eq!(removed.splits, 2);
        assert_eq!(s.storage.subgroups.count().unwrap(), 0);
        assert_eq!(s.storage.people.count().unwrap(), 2);
    }
}
