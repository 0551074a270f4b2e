//! Subgroup CLI commands

use clap::Subcommand;

use super::resolve_people;
use crate::display::format_subgroups;
use crate::error::FairshareResult;
use crate::models::Occasion;
use crate::services::{PartyNames, PersonService, SubgroupService};
use crate::storage::Storage;

/// Subgroup subcommands
#[derive(Subcommand)]
pub enum SubgroupCommands {
    /// Create a subgroup
    Create {
        /// Subgroup name
        name: String,
        /// Members (names or IDs, comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        members: Vec<String>,
    },
    /// List the subgroups of the occasion
    List,
    /// Rename a subgroup
    Rename {
        /// Subgroup name or ID
        subgroup: String,
        /// New name
        name: String,
    },
    /// Add a person to a subgroup
    AddMember {
        /// Subgroup name or ID
        subgroup: String,
        /// Person name or ID
        person: String,
    },
    /// Remove a person from a subgroup
    RemoveMember {
        /// Subgroup name or ID
        subgroup: String,
        /// Person name or ID
        person: String,
    },
    /// Delete a subgroup with the expenses it paid and its settlements
    Delete {
        /// Subgroup name or ID
        subgroup: String,
    },
}

/// Handle a subgroup command
pub fn handle_subgroup_command(
    storage: &Storage,
    occasion: &Occasion,
    cmd: SubgroupCommands,
) -> FairshareResult<()> {
    let service = SubgroupService::new(storage);
    let people = PersonService::new(storage);

    match cmd {
        SubgroupCommands::Create { name, members } => {
            let members = resolve_people(storage, occasion.id, &members)?;
            let subgroup = service.create(occasion.id, &name, &members)?;
            println!(
                "Created subgroup {} with {} member(s)",
                subgroup.name,
                subgroup.members.len()
            );
            println!("  ID: {}", subgroup.id);
        }

        SubgroupCommands::List => {
            let subgroups = service.list(occasion.id)?;
            let names = PartyNames::new(&people.list(occasion.id)?, &subgroups);
            print!("{}", format_subgroups(&subgroups, &names));
        }

        SubgroupCommands::Rename { subgroup, name } => {
            let found = service.resolve(occasion.id, &subgroup)?;
            let renamed = service.rename(found.id, &name)?;
            println!("Renamed '{}' to '{}'", found.name, renamed.name);
        }

        SubgroupCommands::AddMember { subgroup, person } => {
            let found = service.resolve(occasion.id, &subgroup)?;
            let person = people.resolve(occasion.id, &person)?;
            service.add_member(found.id, person.id)?;
            println!("Added {} to {}", person.name, found.name);
        }

        SubgroupCommands::RemoveMember { subgroup, person } => {
            let found = service.resolve(occasion.id, &subgroup)?;
            let person = people.resolve(occasion.id, &person)?;
            service.remove_member(found.id, person.id)?;
            println!("Removed {} from {}", person.name, found.name);
        }

        SubgroupCommands::Delete { subgroup } => {
            let found = service.resolve(occasion.id, &subgroup)?;
            let removed = service.delete(found.id)?;
            println!("Deleted subgroup {}", found.name);
            println!(
                "  Also removed {} expenses, {} settlements",
                removed.expenses, removed.settlements
            );
        }
    }

    Ok(())
}
