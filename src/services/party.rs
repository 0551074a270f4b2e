//! Party lookup
//!
//! People and subgroups of one occasion share a single name namespace, so a
//! payer or settlement party typed on the command line resolves to exactly
//! one of them. People are tried first.

use std::collections::HashMap;

use crate::error::{FairshareError, FairshareResult};
use crate::models::{OccasionId, Party, Person, Subgroup};
use crate::storage::Storage;

/// Resolve a name or ID to a person or subgroup of the occasion
pub fn resolve_party(
    storage: &Storage,
    occasion_id: OccasionId,
    identifier: &str,
) -> FairshareResult<Party> {
    if let Some(person) = storage.people.get_by_name(occasion_id, identifier)? {
        return Ok(Party::Person(person.id));
    }
    if let Some(subgroup) = storage.subgroups.get_by_name(occasion_id, identifier)? {
        return Ok(Party::Subgroup(subgroup.id));
    }

    if let Some(person) = storage
        .people
        .find(|p| p.occasion_id == occasion_id && p.id.matches(identifier))?
    {
        return Ok(Party::Person(person.id));
    }
    if let Some(subgroup) = storage
        .subgroups
        .find(|s| s.occasion_id == occasion_id && s.id.matches(identifier))?
    {
        return Ok(Party::Subgroup(subgroup.id));
    }

    Err(FairshareError::party_not_found(identifier))
}

/// Fail unless the party is a person or subgroup of the occasion
pub fn ensure_in_occasion(
    storage: &Storage,
    occasion_id: OccasionId,
    party: Party,
) -> FairshareResult<()> {
    match party {
        Party::Person(id) => match storage.people.get(id)? {
            Some(person) if person.occasion_id == occasion_id => Ok(()),
            _ => Err(FairshareError::person_not_found(id.to_string())),
        },
        Party::Subgroup(id) => match storage.subgroups.get(id)? {
            Some(subgroup) if subgroup.occasion_id == occasion_id => Ok(()),
            _ => Err(FairshareError::subgroup_not_found(id.to_string())),
        },
    }
}

/// Fail if a person or subgroup of the occasion other than `exclude`
/// already uses `name`
pub fn ensure_name_available(
    storage: &Storage,
    occasion_id: OccasionId,
    name: &str,
    exclude: Option<Party>,
) -> FairshareResult<()> {
    let taken_by_person = storage
        .people
        .get_by_name(occasion_id, name)?
        .is_some_and(|person| Some(Party::Person(person.id)) != exclude);
    let taken_by_subgroup = storage
        .subgroups
        .get_by_name(occasion_id, name)?
        .is_some_and(|subgroup| Some(Party::Subgroup(subgroup.id)) != exclude);

    if taken_by_person || taken_by_subgroup {
        return Err(FairshareError::Duplicate {
            entity_type: "Person or subgroup",
            identifier: name.trim().to_string(),
        });
    }

    Ok(())
}

/// Display names for the parties of an occasion
#[derive(Debug, Clone, Default)]
pub struct PartyNames {
    names: HashMap<Party, String>,
}

impl PartyNames {
    pub fn new(people: &[Person], subgroups: &[Subgroup]) -> Self {
        let people = people
            .iter()
            .map(|p| (Party::Person(p.id), p.name.clone()));
        let subgroups = subgroups
            .iter()
            .map(|s| (Party::Subgroup(s.id), s.name.clone()));

        Self {
            names: people.chain(subgroups).collect(),
        }
    }

    /// Name of a party, or its short ID if it no longer exists
    pub fn name(&self, party: Party) -> String {
        self.names
            .get(&party)
            .cloned()
            .unwrap_or_else(|| party.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FairsharePaths;
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
    fn test_resolve_person_then_subgroup() {
        let (_temp_dir, storage) = create_test_storage();
        let occasion = OccasionId::new();
        let alice = Person::new(occasion, "Alice");
        let family = Subgroup::with_members(occasion, "Family", [alice.id]);
        storage.people.upsert(alice.clone()).unwrap();
        storage.subgroups.upsert(family.clone()).unwrap();

        assert_eq!(
            resolve_party(&storage, occasion, "alice").unwrap(),
            Party::Person(alice.id)
        );
        assert_eq!(
            resolve_party(&storage, occasion, "FAMILY").unwrap(),
            Party::Subgroup(family.id)
        );
        assert_eq!(
            resolve_party(&storage, occasion, &family.id.to_string()).unwrap(),
            Party::Subgroup(family.id)
        );

        let missing = resolve_party(&storage, occasion, "Zed").unwrap_err();
        assert!(missing.is_not_found());
        assert!(resolve_party(&storage, OccasionId::new(), "Alice").is_err());
    }

    #[test]
    fn test_shared_namespace() {
        let (_temp_dir, storage) = create_test_storage();
        let occasion = OccasionId::new();
        let alice = Person::new(occasion, "Alice");
        storage.people.upsert(alice.clone()).unwrap();

        assert!(matches!(
            ensure_name_available(&storage, occasion, "alice", None),
            Err(FairshareError::Duplicate { .. })
        ));
        assert!(
            ensure_name_available(&storage, occasion, "alice", Some(Party::Person(alice.id)))
                .is_ok()
        );
        assert!(ensure_name_available(&storage, OccasionId::new(), "alice", None).is_ok());
    }

    #[test]
    fn test_party_names_fallback() {
        let occasion = OccasionId::new();
        let bob = Person::new(occasion, "Bob");
        let names = PartyNames::new(std::slice::from_ref(&bob), &[]);

        assert_eq!(names.name(Party::Person(bob.id)), "Bob");
        let ghost = PersonId::new();
        assert_eq!(names.name(Party::Person(ghost)), ghost.to_string());
    }
}
