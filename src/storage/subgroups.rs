//! Subgroup repository (`subgroups.json`)

use chrono::{DateTime, Utc};

use crate::error::FairshareResult;
use crate::models::{OccasionId, PersonId, Subgroup, SubgroupId};

use super::repository::{Record, Repository};

impl Record for Subgroup {
    type Id = SubgroupId;
    type SortKey = (DateTime<Utc>, SubgroupId);

    fn id(&self) -> SubgroupId {
        self.id
    }

    fn sort_key(&self) -> Self::SortKey {
        (self.created_at, self.id)
    }
}

pub type SubgroupRepository = Repository<Subgroup>;

impl Repository<Subgroup> {
    pub fn get_by_occasion(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Subgroup>> {
        self.filter(|subgroup| subgroup.occasion_id == occasion_id)
    }

    /// Find a subgroup in an occasion by name (case-insensitive)
    pub fn get_by_name(
        &self,
        occasion_id: OccasionId,
        name: &str,
    ) -> FairshareResult<Option<Subgroup>> {
        self.find(|subgroup| subgroup.occasion_id == occasion_id && subgroup.matches_name(name))
    }

    /// Subgroups that count a person among their members
    pub fn get_by_member(&self, person_id: PersonId) -> FairshareResult<Vec<Subgroup>> {
        self.filter(|subgroup| subgroup.has_member(person_id))
    }

    pub fn delete_by_occasion(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Subgroup>> {
        self.delete_where(|subgroup| subgroup.occasion_id == occasion_id)
    }
}
