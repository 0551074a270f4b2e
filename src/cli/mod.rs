//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod occasion;
pub mod person;
pub mod report;
pub mod settle;
pub mod subgroup;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use occasion::{handle_occasion_command, OccasionCommands};
pub use person::{handle_person_command, PersonCommands};
pub use report::{
    handle_audit_command, handle_balances_command, handle_check_command, handle_stats_command,
    handle_suggest_command, handle_summary_command,
};
pub use settle::{handle_settle_command, SettleCommands};
pub use subgroup::{handle_subgroup_command, SubgroupCommands};

use chrono::NaiveDate;

use crate::error::{FairshareError, FairshareResult};
use crate::models::{Money, OccasionId, PersonId};
use crate::services::PersonService;
use crate::storage::Storage;

/// Parse a money argument such as `12.50`, `$12.50` or `12`
pub(crate) fn parse_money(input: &str) -> FairshareResult<Money> {
    Money::parse(input).map_err(|e| FairshareError::Validation(e.to_string()))
}

/// Parse a date argument in `YYYY-MM-DD` form
pub(crate) fn parse_date(input: &str) -> FairshareResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        FairshareError::Validation(format!(
            "Invalid date '{}'. Use the format YYYY-MM-DD.",
            input
        ))
    })
}

/// Resolve a list of person names or IDs
pub(crate) fn resolve_people(
    storage: &Storage,
    occasion_id: OccasionId,
    identifiers: &[String],
) -> FairshareResult<Vec<PersonId>> {
    let service = PersonService::new(storage);
    identifiers
        .iter()
        .map(|identifier| service.resolve(occasion_id, identifier).map(|p| p.id))
        .collect()
}
