//! Settlement service

use chrono::{Local, NaiveDate};

use crate::audit::EntityType;
use crate::engine::{LedgerSource, SuggestedTransfer};
use crate::error::{FairshareError, FairshareResult};
use crate::models::{Money, OccasionId, Party, Settlement, SettlementId};
use crate::storage::Storage;

use super::party::ensure_in_occasion;

/// Service for recording payments between parties
pub struct SettlementService<'a> {
    storage: &'a Storage,
}

impl<'a> SettlementService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a payment from one party of the occasion to another.
    /// The date defaults to today.
    pub fn record(
        &self,
        occasion_id: OccasionId,
        from: Party,
        to: Party,
        amount: Money,
        date: Option<NaiveDate>,
    ) -> FairshareResult<Settlement> {
        if self.storage.occasions.get(occasion_id)?.is_none() {
            return Err(FairshareError::occasion_not_found(occasion_id.to_string()));
        }
        ensure_in_occasion(self.storage, occasion_id, from)?;
        ensure_in_occasion(self.storage, occasion_id, to)?;

        let date = date.unwrap_or_else(|| Local::now().date_naive());
        self.storage
            .record_settlement(occasion_id, from, to, amount, date)
    }

    /// Record every suggested transfer as a settlement
    pub fn record_suggestions(
        &self,
        occasion_id: OccasionId,
        suggestions: &[SuggestedTransfer],
        date: Option<NaiveDate>,
    ) -> FairshareResult<Vec<Settlement>> {
        suggestions
            .iter()
            .map(|transfer| {
                self.record(
                    occasion_id,
                    Party::Person(transfer.from_id),
                    Party::Person(transfer.to_id),
                    transfer.amount,
                    date,
                )
            })
            .collect()
    }

    /// Settlements of an occasion, newest first
    pub fn list(&self, occasion_id: OccasionId) -> FairshareResult<Vec<Settlement>> {
        let mut settlements = self.storage.settlements.get_by_occasion(occasion_id)?;
        settlements.reverse();
        Ok(settlements)
    }

    pub fn resolve(&self, occasion_id: OccasionId, identifier: &str) -> FairshareResult<Settlement> {
        self.storage
            .settlements
            .find(|s| s.occasion_id == occasion_id && s.id.matches(identifier))?
            .ok_or_else(|| FairshareError::settlement_not_found(identifier))
    }

    pub fn delete(&self, id: SettlementId) -> FairshareResult<Settlement> {
        let settlement = self
            .storage
            .settlements
            .get(id)?
            .ok_or_else(|| FairshareError::settlement_not_found(id.to_string()))?;

        self.storage.settlements.delete(id)?;
        self.storage.settlements.save()?;

        self.storage.log_delete(
            EntityType::Settlement,
            settlement.id.to_string(),
            Some(settlement.amount.to_string()),
            &settlement,
        )?;

        Ok(settlement)
    }
}
