//! Occasion repository (`occasions.json`)

use chrono::{DateTime, Utc};

use crate::error::FairshareResult;
use crate::models::{Occasion, OccasionId};

use super::repository::{Record, Repository};

impl Record for Occasion {
    type Id = OccasionId;
    type SortKey = (DateTime<Utc>, OccasionId);

    fn id(&self) -> OccasionId {
        self.id
    }

    fn sort_key(&self) -> Self::SortKey {
        (self.created_at, self.id)
    }
}

pub type OccasionRepository = Repository<Occasion>;

impl Repository<Occasion> {
    /// Find an occasion by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> FairshareResult<Option<Occasion>> {
        self.find(|occasion| occasion.matches_name(name))
    }

    /// Check if a name is taken by an occasion other than `exclude`
    pub fn name_exists(&self, name: &str, exclude: Option<OccasionId>) -> FairshareResult<bool> {
        Ok(self
            .get_by_name(name)?
            .is_some_and(|occasion| Some(occasion.id) != exclude))
    }
}
