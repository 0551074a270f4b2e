//! Balance service
//!
//! Fetches a fresh snapshot of an occasion for every query and runs the
//! settlement engine over it.

use crate::engine::{Balance, IntegrityIssue, LedgerSnapshot, SubgroupPolicy, SuggestedTransfer};
use crate::error::FairshareResult;
use crate::models::OccasionId;
use crate::storage::Storage;

pub struct BalanceService<'a> {
    storage: &'a Storage,
    policy: SubgroupPolicy,
}

impl<'a> BalanceService<'a> {
    pub fn new(storage: &'a Storage, policy: SubgroupPolicy) -> Self {
        Self { storage, policy }
    }

    pub fn policy(&self) -> SubgroupPolicy {
        self.policy
    }

    pub fn snapshot(&self, occasion_id: OccasionId) -> FairshareResult<LedgerSnapshot> {
        LedgerSnapshot::fetch(self.storage, occasion_id)
    }

    /// Net balance per person, largest creditor first
    pub fn balances(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Balance>> {
        Ok(self.snapshot(occasion_id)?.balances(self.policy))
    }

    pub fn suggestions(&self, occasion_id: OccasionId) -> FairshareResult<Vec<SuggestedTransfer>> {
        Ok(self.snapshot(occasion_id)?.suggestions(self.policy))
    }

    pub fn check(&self, occasion_id: OccasionId) -> FairshareResult<Vec<IntegrityIssue>> {
        Ok(self.snapshot(occasion_id)?.integrity_issues(self.policy))
    }
}
