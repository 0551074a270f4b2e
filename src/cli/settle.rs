//! Settlement CLI commands

use clap::Subcommand;

use super::{parse_date, parse_money};
use crate::config::settings::Settings;
use crate::display::format_settlement_list;
use crate::error::FairshareResult;
use crate::models::Occasion;
use crate::services::{resolve_party, PartyNames, PersonService, SettlementService, SubgroupService};
use crate::storage::Storage;

/// Settlement subcommands
#[derive(Subcommand)]
pub enum SettleCommands {
    /// Record a payment from one party to another
    Record {
        /// Who paid (person or subgroup name or ID)
        from: String,
        /// Who received it
        to: String,
        /// Amount (e.g. "12.50")
        amount: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List recorded settlements, newest first
    List,
    /// Delete a settlement
    Delete {
        /// Settlement ID
        settlement: String,
    },
}

/// Handle a settlement command
pub fn handle_settle_command(
    storage: &Storage,
    settings: &Settings,
    occasion: &Occasion,
    cmd: SettleCommands,
) -> FairshareResult<()> {
    let service = SettlementService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        SettleCommands::Record {
            from,
            to,
            amount,
            date,
        } => {
            let settlement = service.record(
                occasion.id,
                resolve_party(storage, occasion.id, &from)?,
                resolve_party(storage, occasion.id, &to)?,
                parse_money(&amount)?,
                date.as_deref().map(parse_date).transpose()?,
            )?;
            println!(
                "Recorded settlement: {} paid {} {}",
                from,
                to,
                settlement.amount.format_with_symbol(symbol)
            );
            println!("  ID: {}", settlement.id);
        }

        SettleCommands::List => {
            let settlements = service.list(occasion.id)?;
            let names = PartyNames::new(
                &PersonService::new(storage).list(occasion.id)?,
                &SubgroupService::new(storage).list(occasion.id)?,
            );
            print!(
                "{}",
                format_settlement_list(&settlements, &names, symbol, &settings.date_format)
            );
        }

        SettleCommands::Delete { settlement } => {
            let found = service.resolve(occasion.id, &settlement)?;
            service.delete(found.id)?;
            println!(
                "Deleted settlement {} ({})",
                found.id,
                found.amount.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}
