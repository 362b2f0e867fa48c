//! Campaign spend CLI commands

use chrono::Local;
use clap::Subcommand;

use crate::console::Console;
use crate::display::operations::format_spend_list;
use crate::error::CreatorFlowResult;
use crate::models::{SettlementStatus, SpendCategory};
use crate::services::{InfluencerService, TransactionService};

use super::{parse_choice, parse_money, parse_optional_choice, parse_optional_date};

/// Campaign spend subcommands
#[derive(Subcommand)]
pub enum SpendCommands {
    /// Record money spent on an influencer
    Add {
        /// Influencer handle or ID
        influencer: String,
        /// Amount
        amount: String,
        /// commission, ad_spend, production or gift
        #[arg(short, long, default_value = "commission")]
        category: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// paid, pending or overdue (defaults to pending)
        #[arg(short, long)]
        status: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List campaign spend, newest first
    List {
        /// Only this influencer (handle or ID)
        #[arg(short, long)]
        influencer: Option<String>,
    },
    /// Change the settlement status of an entry
    Status {
        /// Transaction ID
        transaction: String,
        /// paid, pending or overdue
        status: String,
    },
    /// Delete an entry
    Delete {
        /// Transaction ID
        transaction: String,
    },
}

/// Handle a spend command
pub fn handle_spend_command(console: &Console, cmd: SpendCommands) -> CreatorFlowResult<()> {
    let service = TransactionService::new(console.storage());
    let roster = InfluencerService::new(console.storage());

    match cmd {
        SpendCommands::Add {
            influencer,
            amount,
            category,
            date,
            status,
            description,
        } => {
            let influencer = roster.find(&influencer)?;
            let amount = parse_money(&amount)?;
            let date = parse_optional_date(date.as_deref())?.unwrap_or_else(|| Local::now().date_naive());
            let category = parse_choice::<SpendCategory>(&category)?;
            let status = parse_optional_choice::<SettlementStatus>(status.as_deref())?;

            let mut txn = service.create(influencer.id, amount, date, category, description)?;
            if let Some(status) = status.filter(|s| *s != txn.status) {
                txn = service.set_status(txn.id, status)?;
            }
            println!(
                "Recorded {} {} for {} ({})",
                txn.category, txn.amount, influencer.name, txn.status
            );
            println!("  ID: {}", txn.id);
        }

        SpendCommands::List { influencer } => {
            let filter = match influencer {
                Some(input) => Some(roster.find(&input)?.id),
                None => None,
            };
            let txns = service.list(filter)?;
            println!("{}", format_spend_list(&txns, &roster.list()?));
        }

        SpendCommands::Status { transaction, status } => {
            let status = parse_choice::<SettlementStatus>(&status)?;
            let found = service.find(&transaction)?;
            let updated = service.set_status(found.id, status)?;
            println!("Transaction {} is now {}", updated.id, updated.status);
        }

        SpendCommands::Delete { transaction } => {
            let found = service.find(&transaction)?;
            let removed = service.delete(found.id)?;
            println!("Deleted {} {} from {}", removed.category, removed.amount, removed.date);
        }
    }

    Ok(())
}
