//! Balance, suggestion and report commands
//!
//! These commands are read-only except for `suggest --record`.

use crate::audit::AuditLogger;
use crate::config::settings::Settings;
use crate::display::{format_audit_entries, format_balances, format_issues, format_suggestions};
use crate::error::FairshareResult;
use crate::models::Occasion;
use crate::reports::{OccasionStats, PartySummary};
use crate::services::{resolve_party, BalanceService, SettlementService};
use crate::storage::Storage;

use super::parse_date;

pub fn handle_balances_command(
    storage: &Storage,
    settings: &Settings,
    occasion: &Occasion,
) -> FairshareResult<()> {
    let balances = BalanceService::new(storage, settings.subgroup_policy).balances(occasion.id)?;
    println!("Balances for {}", occasion.name);
    print!("{}", format_balances(&balances, &settings.currency_symbol));
    Ok(())
}

/// Show settle-up suggestions, optionally recording all of them
pub fn handle_suggest_command(
    storage: &Storage,
    settings: &Settings,
    occasion: &Occasion,
    record: bool,
    date: Option<String>,
) -> FairshareResult<()> {
    let suggestions =
        BalanceService::new(storage, settings.subgroup_policy).suggestions(occasion.id)?;
    print!(
        "{}",
        format_suggestions(&suggestions, &settings.currency_symbol)
    );

    if record && !suggestions.is_empty() {
        let date = date.as_deref().map(parse_date).transpose()?;
        let recorded =
            SettlementService::new(storage).record_suggestions(occasion.id, &suggestions, date)?;
        println!("Recorded {} settlement(s).", recorded.len());
    }

    Ok(())
}

pub fn handle_stats_command(
    storage: &Storage,
    settings: &Settings,
    occasion: &Occasion,
) -> FairshareResult<()> {
    let snapshot = BalanceService::new(storage, settings.subgroup_policy).snapshot(occasion.id)?;
    let stats = OccasionStats::generate(&snapshot);
    println!("Statistics for {}", occasion.name);
    print!("{}", stats.format_terminal(&settings.currency_symbol));
    Ok(())
}

pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    occasion: &Occasion,
    name: &str,
) -> FairshareResult<()> {
    let party = resolve_party(storage, occasion.id, name)?;
    let snapshot = BalanceService::new(storage, settings.subgroup_policy).snapshot(occasion.id)?;
    let summary = PartySummary::generate(&snapshot, party)?;
    print!("{}", summary.format_terminal(&settings.currency_symbol));
    Ok(())
}

pub fn handle_check_command(
    storage: &Storage,
    settings: &Settings,
    occasion: &Occasion,
) -> FairshareResult<()> {
    let issues = BalanceService::new(storage, settings.subgroup_policy).check(occasion.id)?;
    print!("{}", format_issues(&issues));
    Ok(())
}

/// Show the most recent audit entries
pub fn handle_audit_command(audit: &AuditLogger, limit: usize) -> FairshareResult<()> {
    let entries = audit.read_recent(limit)?;
    print!("{}", format_audit_entries(&entries));
    Ok(())
}
