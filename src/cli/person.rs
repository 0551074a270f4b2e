//! Person CLI commands

use clap::Subcommand;

use crate::display::format_people;
use crate::error::FairshareResult;
use crate::models::Occasion;
use crate::services::{PersonService, SubgroupService};
use crate::storage::Storage;

/// Person subcommands
#[derive(Subcommand)]
pub enum PersonCommands {
    /// Add a person to the occasion
    Add {
        /// Person name
        name: String,
    },
    /// List the people of the occasion
    List,
    /// Rename a person
    Rename {
        /// Person name or ID
        person: String,
        /// New name
        name: String,
    },
    /// Remove a person with their splits, payments and settlements
    #[command(alias = "delete")]
    Remove {
        /// Person name or ID
        person: String,
    },
}

/// Handle a person command
pub fn handle_person_command(
    storage: &Storage,
    occasion: &Occasion,
    cmd: PersonCommands,
) -> FairshareResult<()> {
    let service = PersonService::new(storage);

    match cmd {
        PersonCommands::Add { name } => {
            let person = service.add(occasion.id, &name)?;
            println!("Added {} to {}", person.name, occasion.name);
            println!("  ID: {}", person.id);
        }

        PersonCommands::List => {
            let people = service.list(occasion.id)?;
            let subgroups = SubgroupService::new(storage).list(occasion.id)?;
            print!("{}", format_people(&people, &subgroups));
        }

        PersonCommands::Rename { person, name } => {
            let found = service.resolve(occasion.id, &person)?;
            let renamed = service.rename(found.id, &name)?;
            println!("Renamed '{}' to '{}'", found.name, renamed.name);
        }

        PersonCommands::Remove { person } => {
            let found = service.resolve(occasion.id, &person)?;
            let removed = service.delete(found.id)?;
            println!("Removed {}", found.name);
            println!(
                "  Also removed {} expenses, {} splits, {} settlements",
                removed.expenses, removed.splits, removed.settlements
            );
        }
    }

    Ok(())
}
