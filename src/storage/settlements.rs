//! Settlement repository (`settlements.json`)

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::FairshareResult;
use crate::models::{OccasionId, Party, Settlement, SettlementId};

use super::repository::{Record, Repository};

impl Record for Settlement {
    type Id = SettlementId;
    type SortKey = (NaiveDate, DateTime<Utc>, SettlementId);

    fn id(&self) -> SettlementId {
        self.id
    }

    fn sort_key(&self) -> Self::SortKey {
        (self.date, self.created_at, self.id)
    }
}

pub type SettlementRepository = Repository<Settlement>;

impl Repository<Settlement> {
    /// Settlements of an occasion, oldest first
    pub fn get_by_occasion(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Settlement>> {
        self.filter(|settlement| settlement.occasion_id == occasion_id)
    }

    /// Remove every settlement a party takes part in
    pub fn delete_involving(&self, party: Party) -> FairshareResult<Vec<Settlement>> {
        self.delete_where(|settlement| settlement.involves(party))
    }

    pub fn delete_by_occasion(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Settlement>> {
        self.delete_where(|settlement| settlement.occasion_id == occasion_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PersonId};
    use tempfile::TempDir;

    #[test]
    fn test_delete_involving() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SettlementRepository::new(temp_dir.path().join("settlements.json"));
        let occasion = OccasionId::new();
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let alice = Party::Person(PersonId::new());
        let bob = Party::Person(PersonId::new());
        let carol = Party::Person(PersonId::new());

        repo.upsert(Settlement::new(occasion, alice, bob, Money::from_cents(100), date)).unwrap();
        repo.upsert(Settlement::new(occasion, carol, alice, Money::from_cents(200), date)).unwrap();
        repo.upsert(Settlement::new(occasion, bob, carol, Money::from_cents(300), date)).unwrap();

        let removed = repo.delete_involving(alice).unwrap();
        assert_eq!(removed.len(), 2);

        let remaining = repo.get_by_occasion(occasion).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].amount, Money::from_cents(300));
    }
}
