//! Project CLI commands
//!
//! Implements CLI commands for projects, their expense lines and payments.

use clap::Subcommand;

use crate::console::Console;
use crate::display::project::{format_project_details, format_project_list};
use crate::error::CreatorFlowResult;
use crate::models::{ExpenseItemPatch, Money};
use crate::services::{NewExpenseItem, ProjectService};

use super::{parse_money, parse_optional_money};

/// Project subcommands
#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    Create {
        /// Project title
        title: String,
        /// Budget (e.g., "1000.00" or "1000"); 0 means no budget
        #[arg(short, long, default_value = "0")]
        budget: String,
    },
    /// List all projects
    List,
    /// Show a project with its expense lines
    Show {
        /// Project title or ID
        project: String,
    },
    /// Delete a project and its expense lines
    Delete {
        /// Project title or ID
        project: String,
    },
    /// Add an expense line
    AddItem {
        /// Project title or ID
        project: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Category label (defaults to "Other")
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        quantity: Option<u32>,
        /// Unit price
        #[arg(short, long)]
        price: Option<String>,
    },
    /// Edit an expense line
    EditItem {
        /// Project title or ID
        project: String,
        /// Line position (1-based) or item ID
        item: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        quantity: Option<u32>,
        #[arg(short, long)]
        price: Option<String>,
    },
    /// Remove an expense line
    RemoveItem {
        /// Project title or ID
        project: String,
        /// Line position (1-based) or item ID
        item: String,
    },
    /// Record a payment against a project
    Pay {
        /// Project title or ID
        project: String,
        /// Amount paid
        amount: String,
    },
}

/// Handle a project command
pub fn handle_project_command(console: &Console, cmd: ProjectCommands) -> CreatorFlowResult<()> {
    let service = ProjectService::new(console.storage(), console.settings());

    match cmd {
        ProjectCommands::Create { title, budget } => {
            let budget = parse_money(&budget)?;
            let project = service.create(&title, budget)?;
            println!("Created project: {}", project.title);
            println!("  Budget: {}", project.budget);
            println!("  ID: {}", project.id);
        }

        ProjectCommands::List => {
            print!("{}", format_project_list(&service.list()?));
        }

        ProjectCommands::Show { project } => {
            let found = service.find(&project)?;
            print!("{}", format_project_details(&found));
        }

        ProjectCommands::Delete { project } => {
            let found = service.find(&project)?;
            let removed = service.delete(found.id)?;
            println!(
                "Deleted project: {} ({} expense items)",
                removed.title,
                removed.expenses.len()
            );
        }

        ProjectCommands::AddItem {
            project,
            description,
            category,
            quantity,
            price,
        } => {
            let found = service.find(&project)?;
            let fields = NewExpenseItem {
                description,
                category,
                quantity,
                unit_price: parse_optional_money(price.as_deref())?,
            };
            let (updated, item_id) = service.add_item(found.id, fields)?;
            println!("Added expense item {} to {}", item_id, updated.title);
            println!("  Total Cost: {}", updated.total_cost());
        }

        ProjectCommands::EditItem {
            project,
            item,
            description,
            category,
            quantity,
            price,
        } => {
            let found = service.find(&project)?;
            let patch = ExpenseItemPatch {
                description,
                category,
                quantity,
                unit_price: parse_optional_money(price.as_deref())?,
            };
            if patch.is_empty() {
                println!("No changes specified. Use --description, --category, --quantity or --price.");
                return Ok(());
            }
            let updated = service.update_item(found.id, &item, &patch)?;
            println!("Updated expense item in {}", updated.title);
            println!("  Total Cost: {}", updated.total_cost());
        }

        ProjectCommands::RemoveItem { project, item } => {
            let found = service.find(&project)?;
            let (updated, removed) = service.remove_item(found.id, &item)?;
            println!(
                "Removed expense item {} ({}) from {}",
                removed.id,
                removed.line_amount(),
                updated.title
            );
        }

        ProjectCommands::Pay { project, amount } => {
            let found = service.find(&project)?;
            let amount: Money = parse_money(&amount)?;
            let updated = service.record_payment(found.id, amount)?;
            println!("Recorded payment of {} for {}", amount, updated.title);
            println!("  Paid: {}", updated.paid_amount);
            println!("  Balance Due: {}", updated.balance_due());
            println!("  Status: {}", updated.status);
        }
    }

    Ok(())
}
