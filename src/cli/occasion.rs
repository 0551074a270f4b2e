//! Occasion CLI commands

use clap::Subcommand;

use crate::config::paths::FairsharePaths;
use crate::config::settings::Settings;
use crate::display::format_occasion_list;
use crate::error::FairshareResult;
use crate::services::OccasionService;
use crate::storage::Storage;

/// Occasion subcommands
#[derive(Subcommand)]
pub enum OccasionCommands {
    /// Create a new occasion (selected automatically if none is active)
    Create {
        /// Occasion name
        name: String,
    },
    /// List all occasions
    List,
    /// Rename an occasion
    Rename {
        /// Occasion name or ID
        #[arg(value_name = "OCCASION")]
        target: String,
        /// New name
        name: String,
    },
    /// Delete an occasion and everything recorded in it
    Delete {
        /// Occasion name or ID
        #[arg(value_name = "OCCASION")]
        target: String,
    },
    /// Select the occasion other commands operate on
    Use {
        /// Occasion name or ID
        #[arg(value_name = "OCCASION")]
        target: String,
    },
}

/// Handle an occasion command
pub fn handle_occasion_command(
    storage: &Storage,
    paths: &FairsharePaths,
    settings: &mut Settings,
    cmd: OccasionCommands,
) -> FairshareResult<()> {
    let service = OccasionService::new(storage);

    match cmd {
        OccasionCommands::Create { name } => {
            let occasion = service.create(&name)?;
            println!("Created occasion: {}", occasion.name);
            println!("  ID: {}", occasion.id);

            if settings.active_occasion.is_none() {
                settings.active_occasion = Some(occasion.id);
                settings.save(paths)?;
                println!("  Now the active occasion.");
            }
        }

        OccasionCommands::List => {
            let occasions = service.list()?;
            print!("{}", format_occasion_list(&occasions, settings.active_occasion));
        }

        OccasionCommands::Rename { target, name } => {
            let found = service.resolve(&target)?;
            let renamed = service.rename(found.id, &name)?;
            println!("Renamed occasion '{}' to '{}'", found.name, renamed.name);
        }

        OccasionCommands::Delete { target } => {
            let found = service.resolve(&target)?;
            let removed = service.delete(found.id)?;

            if settings.active_occasion == Some(found.id) {
                settings.active_occasion = None;
                settings.save(paths)?;
            }

            println!("Deleted occasion: {}", found.name);
            println!(
                "  Removed {} people, {} subgroups, {} expenses, {} settlements",
                removed.people, removed.subgroups, removed.expenses, removed.settlements
            );
        }

        OccasionCommands::Use { target } => {
            let found = service.resolve(&target)?;
            settings.active_occasion = Some(found.id);
            settings.save(paths)?;
            println!("Active occasion: {}", found.name);
        }
    }

    Ok(())
}
