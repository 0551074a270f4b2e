//! Person repository (`people.json`)

use chrono::{DateTime, Utc};

use crate::error::FairshareResult;
use crate::models::{OccasionId, Person, PersonId};

use super::repository::{Record, Repository};

impl Record for Person {
    type Id = PersonId;
    type SortKey = (DateTime<Utc>, PersonId);

    fn id(&self) -> PersonId {
        self.id
    }

    fn sort_key(&self) -> Self::SortKey {
        (self.created_at, self.id)
    }
}

pub type PersonRepository = Repository<Person>;

impl Repository<Person> {
    /// People of an occasion in the order they were added
    pub fn get_by_occasion(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Person>> {
        self.filter(|person| person.occasion_id == occasion_id)
    }

    /// Find a person in an occasion by name (case-insensitive)
    pub fn get_by_name(
        &self,
        occasion_id: OccasionId,
        name: &str,
    ) -> FairshareResult<Option<Person>> {
        self.find(|person| person.occasion_id == occasion_id && person.matches_name(name))
    }

    /// Remove every person of an occasion
    pub fn delete_by_occasion(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Person>> {
        self.delete_where(|person| person.occasion_id == occasion_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scoped_by_occasion() {
        let temp_dir = TempDir::new().unwrap();
        let repo = PersonRepository::new(temp_dir.path().join("people.json"));
        let trip = OccasionId::new();
        let dinner = OccasionId::new();

        repo.upsert(Person::new(trip, "Alice")).unwrap();
        repo.upsert(Person::new(dinner, "Alice")).unwrap();
        repo.upsert(Person::new(trip, "Bob")).unwrap();

        assert_eq!(repo.get_by_occasion(trip).unwrap().len(), 2);
        assert_eq!(
            repo.get_by_name(dinner, "alice").unwrap().unwrap().occasion_id,
            dinner
        );
        assert!(repo.get_by_name(dinner, "Bob").unwrap().is_none());

        let removed = repo.delete_by_occasion(trip).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(repo.count().unwrap(), 1);
    }
}
