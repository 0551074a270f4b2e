use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fairshare::cli::{
    handle_audit_command, handle_balances_command, handle_check_command, handle_expense_command,
    handle_occasion_command, handle_person_command, handle_settle_command, handle_stats_command,
    handle_subgroup_command, handle_suggest_command, handle_summary_command, ExpenseCommands,
    OccasionCommands, PersonCommands, SettleCommands, SubgroupCommands,
};
use fairshare::config::{paths::FairsharePaths, settings::Settings};
use fairshare::engine::SubgroupPolicy;
use fairshare::models::Occasion;
use fairshare::services::OccasionService;
use fairshare::storage::Storage;
use fairshare::FairshareError;

#[derive(Parser)]
#[command(
    name = "fairshare",
    version,
    about = "Split expenses for trips and events, then settle up",
    long_about = "fairshare tracks who paid what during a trip or event, splits every \
                  expense equally among the people who shared it, and suggests the \
                  fewest payments needed to settle everyone up."
)]
struct Cli {
    /// Occasion to operate on (name or ID); defaults to the active one
    #[arg(short, long, global = true, env = "FAIRSHARE_OCCASION")]
    occasion: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show or change configuration
    Config {
        /// Currency symbol used when printing amounts
        #[arg(long)]
        currency: Option<String>,
        /// Date format (strftime)
        #[arg(long)]
        date_format: Option<String>,
        /// How subgroup payers are attributed (ignore, split_among_members)
        #[arg(long)]
        subgroup_policy: Option<SubgroupPolicy>,
    },

    /// Occasion management commands
    #[command(subcommand)]
    Occasion(OccasionCommands),

    /// Person management commands
    #[command(subcommand)]
    Person(PersonCommands),

    /// Subgroup management commands
    #[command(subcommand)]
    Subgroup(SubgroupCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Settlement commands
    #[command(subcommand)]
    Settle(SettleCommands),

    /// Show each person's net balance
    Balances,

    /// Suggest the payments that settle everyone up
    Suggest {
        /// Record every suggestion as a settlement
        #[arg(long)]
        record: bool,
        /// Date for recorded settlements (YYYY-MM-DD)
        #[arg(short, long, requires = "record")]
        date: Option<String>,
    },

    /// Spending statistics for the occasion
    Stats,

    /// What a person or subgroup paid, owes and settled
    Summary {
        /// Person or subgroup name or ID
        name: String,
    },

    /// Report records that balances cannot account for
    Check,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FAIRSHARE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn current_occasion(
    storage: &Storage,
    occasion: Option<&str>,
    settings: &Settings,
) -> Result<Occasion, FairshareError> {
    OccasionService::new(storage).current(occasion, settings)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FairsharePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let occasion_arg = cli.occasion.as_deref();

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing fairshare at: {}", paths.base_dir().display());
            if fairshare::storage::initialize_storage(&paths)? {
                println!("Initialization complete!");
            } else {
                println!("Already initialized.");
            }
            println!();
            println!("Run 'fairshare occasion create <name>' to start tracking an occasion.");
        }
        Some(Commands::Config {
            currency,
            date_format,
            subgroup_policy,
        }) => {
            let changed = currency.is_some() || date_format.is_some() || subgroup_policy.is_some();
            if let Some(currency) = currency {
                settings.currency_symbol = currency;
            }
            if let Some(date_format) = date_format {
                settings.date_format = date_format;
            }
            if let Some(policy) = subgroup_policy {
                settings.subgroup_policy = policy;
            }
            if changed {
                settings.save(&paths)?;
            }

            let active = match settings.active_occasion {
                Some(id) => storage
                    .occasions
                    .get(id)?
                    .map(|o| o.name)
                    .unwrap_or_else(|| id.to_string()),
                None => "(none)".to_string(),
            };

            println!("fairshare Configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Subgroup policy: {}", settings.subgroup_policy);
            println!("  Active occasion: {}", active);
        }
        Some(Commands::Occasion(cmd)) => {
            handle_occasion_command(&storage, &paths, &mut settings, cmd)?;
        }
        Some(Commands::Person(cmd)) => {
            let occasion = current_occasion(&storage, occasion_arg, &settings)?;
            handle_person_command(&storage, &occasion, cmd)?;
        }
        Some(Commands::Subgroup(cmd)) => {
            let occasion = current_occasion(&storage, occasion_arg, &settings)?;
            handle_subgroup_command(&storage, &occasion, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            let occasion = current_occasion(&storage, occasion_arg, &settings)?;
            handle_expense_command(&storage, &settings, &occasion, cmd)?;
        }
        Some(Commands::Settle(cmd)) => {
            let occasion = current_occasion(&storage, occasion_arg, &settings)?;
            handle_settle_command(&storage, &settings, &occasion, cmd)?;
        }
        Some(Commands::Balances) => {
            let occasion = current_occasion(&storage, occasion_arg, &settings)?;
            handle_balances_command(&storage, &settings, &occasion)?;
        }
        Some(Commands::Suggest { record, date }) => {
            let occasion = current_occasion(&storage, occasion_arg, &settings)?;
            handle_suggest_command(&storage, &settings, &occasion, record, date)?;
        }
        Some(Commands::Stats) => {
            let occasion = current_occasion(&storage, occasion_arg, &settings)?;
            handle_stats_command(&storage, &settings, &occasion)?;
        }
        Some(Commands::Summary { name }) => {
            let occasion = current_occasion(&storage, occasion_arg, &settings)?;
            handle_summary_command(&storage, &settings, &occasion, &name)?;
        }
        Some(Commands::Check) => {
            let occasion = current_occasion(&storage, occasion_arg, &settings)?;
            handle_check_command(&storage, &settings, &occasion)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(storage.audit(), limit)?;
        }
        None => {
            println!("fairshare - split expenses and settle up");
            println!();
            println!("Run 'fairshare --help' for usage information.");
            println!("Run 'fairshare occasion create <name>' to get started.");
        }
    }

    Ok(())
}
