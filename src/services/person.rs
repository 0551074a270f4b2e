//! Person service

use crate::audit::{AuditEntry, EntityType};
use crate::error::{FairshareError, FairshareResult};
use crate::models::{OccasionId, Party, Person, PersonId};
use crate::storage::Storage;
use tracing::debug;

use super::occasion::RemovedRecords;
use super::party::ensure_name_available;

/// Service for the people of an occasion
pub struct PersonService<'a> {
    storage: &'a Storage,
}

impl<'a> PersonService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a person to an occasion
    pub fn add(&self, occasion_id: OccasionId, name: &str) -> FairshareResult<Person> {
        if self.storage.occasions.get(occasion_id)?.is_none() {
            return Err(FairshareError::occasion_not_found(occasion_id.to_string()));
        }

        let name = name.trim();
        ensure_name_available(self.storage, occasion_id, name, None)?;

        let person = Person::new(occasion_id, name);
        person
            .validate()
            .map_err(|e| FairshareError::Validation(e.to_string()))?;

        self.storage.people.upsert(person.clone())?;
        self.storage.people.save()?;

        self.storage.log_create(
            EntityType::Person,
            person.id.to_string(),
            Some(person.name.clone()),
            &person,
        )?;

        Ok(person)
    }

    /// People of an occasion in the order they were added
    pub fn list(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Person>> {
        self.storage.people.get_by_occasion(occasion_id)
    }

    /// Find a person of the occasion by name or ID
    pub fn find(&self, occasion_id: OccasionId, identifier: &str) -> FairshareResult<Option<Person>> {
        if let Some(person) = self.storage.people.get_by_name(occasion_id, identifier)? {
            return Ok(Some(person));
        }
        self.storage
            .people
            .find(|p| p.occasion_id == occasion_id && p.id.matches(identifier))
    }

    pub fn resolve(&self, occasion_id: OccasionId, identifier: &str) -> FairshareResult<Person> {
        self.find(occasion_id, identifier)?
            .ok_or_else(|| FairshareError::person_not_found(identifier))
    }

    pub fn rename(&self, id: PersonId, name: &str) -> FairshareResult<Person> {
        let mut person = self
            .storage
            .people
            .get(id)?
            .ok_or_else(|| FairshareError::person_not_found(id.to_string()))?;
        let before = person.clone();

        let name = name.trim();
        ensure_name_available(self.storage, person.occasion_id, name, Some(Party::Person(id)))?;

        person.name = name.to_string();
        person
            .validate()
            .map_err(|e| FairshareError::Validation(e.to_string()))?;

        self.storage.people.upsert(person.clone())?;
        self.storage.people.save()?;

        self.storage.log_update(
            EntityType::Person,
            person.id.to_string(),
            Some(person.name.clone()),
            &before,
            &person,
        )?;

        Ok(person)
    }

    /// Delete a person with their splits, the expenses they paid, the
    /// settlements they took part in and their subgroup memberships
    pub fn delete(&self, id: PersonId) -> FairshareResult<RemovedRecords> {
        let person = self
            .storage
            .people
            .get(id)?
            .ok_or_else(|| FairshareError::person_not_found(id.to_string()))?;
        let party = Party::Person(id);

        let expenses = self.storage.expenses.delete_where(|e| e.payer == party)?;
        let mut splits = self.storage.splits.delete_by_person(id)?.len();
        for expense in &expenses {
            splits += self.storage.splits.delete_by_expense(expense.id)?.len();
        }
        let settlements = self.storage.settlements.delete_involving(party)?;

        let mut entries = Vec::new();
        for mut subgroup in self.storage.subgroups.get_by_member(id)? {
            let before = subgroup.clone();
            subgroup.remove_member(id);
            self.storage.subgroups.upsert(subgroup.clone())?;
            entries.push(AuditEntry::update(
                EntityType::Subgroup,
                subgroup.id.to_string(),
                Some(subgroup.name.clone()),
                &before,
                &subgroup,
            ));
        }

        self.storage.people.delete(id)?;
        self.storage.save_all()?;

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
            EntityType::Person,
            person.id.to_string(),
            Some(person.name.clone()),
            &person,
        ));
        self.storage.log_batch(&entries)?;

        let removed = RemovedRecords {
            people: 1,
            subgroups: 0,
            expenses: expenses.len(),
            splits,
            settlements: settlements.len(),
        };
        debug!(person = %person.name, ?removed, "deleted person");
        Ok(removed)
    }
}
