use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use creatorflow::cli::{
    handle_category_command, handle_delivery_command, handle_export_command,
    handle_history_command, handle_influencer_command, handle_invoice_command, handle_login,
    handle_logout, handle_project_command, handle_report_command, handle_spend_command,
    handle_task_command, handle_whoami, require_session,
};
use creatorflow::config::{paths::CreatorFlowPaths, settings::Settings};
use creatorflow::console::Console;
use creatorflow::logging;
use creatorflow::storage::init::{initialize_storage, seed_sample_data};

#[derive(Parser)]
#[command(
    name = "creatorflow",
    version,
    about = "Campaign and project budgeting for creator teams",
    long_about = "CreatorFlow keeps an influencer roster, product deliveries, campaign \
                  spend, tasks and budgeted projects in local JSON files, and renders \
                  invoices from project expense lines."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, settings and category registry
    Init {
        /// Also load a small sample roster
        #[arg(long)]
        sample: bool,
    },

    /// Show current configuration and paths
    Config,

    /// Sign in
    Login {
        email: String,
        #[arg(short, long, env = "CREATORFLOW_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show the audit trail
    History {
        /// Only entries for this record ID
        #[arg(short, long)]
        entity: Option<String>,
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Budgeted projects and their expense lines
    #[command(subcommand)]
    Project(creatorflow::cli::ProjectCommands),

    /// Expense category registry
    #[command(subcommand)]
    Category(creatorflow::cli::CategoryCommands),

    /// Invoices rendered from a project
    #[command(subcommand)]
    Invoice(creatorflow::cli::InvoiceCommands),

    /// Product deliveries to influencers
    #[command(subcommand)]
    Delivery(creatorflow::cli::DeliveryCommands),

    /// Team tasks
    #[command(subcommand)]
    Task(creatorflow::cli::TaskCommands),

    /// Influencer roster
    #[command(subcommand)]
    Influencer(creatorflow::cli::InfluencerCommands),

    /// Campaign spend
    #[command(subcommand, alias = "txn")]
    Spend(creatorflow::cli::SpendCommands),

    /// Reports
    #[command(subcommand)]
    Report(creatorflow::cli::ReportCommands),

    /// Data export
    #[command(subcommand)]
    Export(creatorflow::cli::ExportCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = CreatorFlowPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    logging::init(&settings.log_level);

    let Some(command) = cli.command else {
        println!("CreatorFlow - campaign and project budgeting for creator teams");
        println!();
        println!("Run 'creatorflow init' to get started.");
        println!("Run 'creatorflow --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Init { sample } => {
            println!("Initializing CreatorFlow at: {}", paths.data_dir().display());
            initialize_storage(&paths, &settings)?;
            if sample {
                let console = Console::open(paths, settings)?;
                if seed_sample_data(console.storage())? {
                    println!("Loaded sample roster.");
                } else {
                    println!("Roster already has influencers; sample data skipped.");
                }
            }
            println!("Initialization complete!");
            println!();
            println!("Run 'creatorflow login <email>' to sign in.");
            return Ok(());
        }
        Commands::Config => {
            println!("CreatorFlow Configuration");
            println!("=========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Date format:        {}", settings.date_format);
            println!("  Delivery pipeline:  {}", settings.enforce_delivery_pipeline);
            println!("  Invoice prefix:     {}", settings.invoice.number_prefix);
            println!("  Invoice due in:     {} days", settings.invoice.due_in_days);
            println!(
                "  Share command:      {}",
                settings.invoice.share_command.as_deref().unwrap_or("(none)")
            );
            println!("  Log level:          {}", settings.log_level);
            return Ok(());
        }
        _ => {}
    }

    if !paths.is_initialized() {
        bail!("CreatorFlow is not initialized. Run 'creatorflow init' first.");
    }

    let mut console = Console::open(paths, settings)?;

    match command {
        Commands::Login { email, password } => {
            handle_login(&mut console, &email, &password)?;
            return Ok(());
        }
        Commands::Logout => {
            handle_logout(&mut console)?;
            return Ok(());
        }
        _ => {}
    }

    require_session(&console)?;

    match command {
        Commands::Whoami => handle_whoami(&console)?,
        Commands::History { entity, limit } => handle_history_command(&console, entity, limit)?,
        Commands::Project(cmd) => handle_project_command(&console, cmd)?,
        Commands::Category(cmd) => handle_category_command(&console, cmd)?,
        Commands::Invoice(cmd) => handle_invoice_command(&console, cmd)?,
        Commands::Delivery(cmd) => handle_delivery_command(&mut console, cmd)?,
        Commands::Task(cmd) => handle_task_command(&mut console, cmd)?,
        Commands::Influencer(cmd) => handle_influencer_command(&console, cmd)?,
        Commands::Spend(cmd) => handle_spend_command(&console, cmd)?,
        Commands::Report(cmd) => handle_report_command(&mut console, cmd)?,
        Commands::Export(cmd) => handle_export_command(console.storage(), cmd)?,
        Commands::Init { .. } | Commands::Config | Commands::Login { .. } | Commands::Logout => {}
    }

    Ok(())
}
