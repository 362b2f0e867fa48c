//! Category CLI commands

use clap::Subcommand;

use crate::console::Console;
use crate::display::category::{format_category_list, format_orphans};
use crate::error::CreatorFlowResult;
use crate::services::{CategoryRemoval, CategoryService};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List registered categories
    List,
    /// Register a new category
    Add {
        /// Category name
        name: String,
    },
    /// Remove a category (expense lines keep their label)
    Delete {
        /// Category name
        name: String,
    },
    /// Show expense lines whose category is no longer registered
    Orphans,
}

/// Handle a category command
pub fn handle_category_command(console: &Console, cmd: CategoryCommands) -> CreatorFlowResult<()> {
    let service = CategoryService::new(console.storage());

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()?));
        }

        CategoryCommands::Add { name } => {
            let added = service.add(&name)?;
            println!("Added category: {}", added);
        }

        CategoryCommands::Delete { name } => match service.delete(&name)? {
            CategoryRemoval::Removed => {
                println!("Deleted category: {}", name.trim());
                let orphans = service.orphans()?;
                if !orphans.is_empty() {
                    println!(
                        "{} expense items still use removed categories. Run 'creatorflow category orphans' to see them.",
                        orphans.len()
                    );
                }
            }
            CategoryRemoval::Protected => {
                println!("The default category cannot be deleted.");
            }
            CategoryRemoval::NotFound => {
                println!("No category named '{}'.", name.trim());
            }
        },

        CategoryCommands::Orphans => {
            println!("{}", format_orphans(&service.orphans()?));
        }
    }

    Ok(())
}
