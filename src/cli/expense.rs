//! Expense CLI commands

use clap::Subcommand;

use super::{parse_date, parse_money, resolve_people};
use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::FairshareResult;
use crate::models::Occasion;
use crate::services::{
    resolve_party, ExpenseChanges, ExpenseService, NewExpense, PartyNames, PersonService,
    SubgroupService,
};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense split equally among people
    Add {
        /// Who paid (person or subgroup name or ID)
        payer: String,
        /// Amount (e.g. "12.50")
        amount: String,
        /// What it was for
        description: String,
        /// Category tag
        #[arg(short, long)]
        category: Option<String>,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// People to split among (comma-separated), defaults to everyone
        #[arg(short, long, value_delimiter = ',')]
        among: Vec<String>,
    },
    /// List expenses, newest first
    List {
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show an expense with its splits
    Show {
        /// Expense ID
        expense: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        expense: String,
        #[arg(long)]
        payer: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// New note (empty to clear)
        #[arg(short, long)]
        note: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        /// Re-split among these people (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        among: Option<Vec<String>>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        expense: String,
    },
}

fn party_names(storage: &Storage, occasion: &Occasion) -> FairshareResult<PartyNames> {
    Ok(PartyNames::new(
        &PersonService::new(storage).list(occasion.id)?,
        &SubgroupService::new(storage).list(occasion.id)?,
    ))
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    occasion: &Occasion,
    cmd: ExpenseCommands,
) -> FairshareResult<()> {
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            payer,
            amount,
            description,
            category,
            note,
            date,
            among,
        } => {
            let mut new = NewExpense::new(
                occasion.id,
                resolve_party(storage, occasion.id, &payer)?,
                parse_money(&amount)?,
                description,
            )
            .with_participants(resolve_people(storage, occasion.id, &among)?);
            new.category = category;
            new.note = note;
            new.date = date.as_deref().map(parse_date).transpose()?;

            let (expense, splits) = service.add(new)?;
            println!(
                "Recorded {} ({}), split among {}",
                expense.description,
                expense.amount.format_with_symbol(symbol),
                splits.len()
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { limit } => {
            let mut expenses = service.list(occasion.id)?;
            if let Some(limit) = limit {
                expenses.truncate(limit);
            }
            let names = party_names(storage, occasion)?;
            print!(
                "{}",
                format_expense_list(&expenses, &names, symbol, &settings.date_format)
            );
        }

        ExpenseCommands::Show { expense } => {
            let found = service.resolve(occasion.id, &expense)?;
            let splits = service.splits(&found)?;
            let names = party_names(storage, occasion)?;
            print!(
                "{}",
                format_expense_details(&found, &splits, &names, symbol, &settings.date_format)
            );
        }

        ExpenseCommands::Edit {
            expense,
            payer,
            amount,
            description,
            category,
            note,
            date,
            among,
        } => {
            let found = service.resolve(occasion.id, &expense)?;
            let changes = ExpenseChanges {
                payer: payer
                    .as_deref()
                    .map(|p| resolve_party(storage, occasion.id, p))
                    .transpose()?,
                amount: amount.as_deref().map(parse_money).transpose()?,
                description,
                category,
                note,
                date: date.as_deref().map(parse_date).transpose()?,
                participants: among
                    .map(|among| resolve_people(storage, occasion.id, &among))
                    .transpose()?,
            };

            if changes.is_empty() {
                println!("No changes specified. Use --help to see editable fields.");
                return Ok(());
            }

            let (updated, splits) = service.edit(found.id, changes)?;
            println!(
                "Updated {} ({}), split among {}",
                updated.description,
                updated.amount.format_with_symbol(symbol),
                splits.len()
            );
        }

        ExpenseCommands::Delete { expense } => {
            let found = service.resolve(occasion.id, &expense)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted expense: {}", deleted.description);
        }
    }

    Ok(())
}
