//! Task CLI commands

use chrono::Local;
use clap::Subcommand;

use crate::console::Console;
use crate::display::operations::{format_task_list, format_task_stats};
use crate::error::CreatorFlowResult;
use crate::models::{Priority, TaskPatch, TaskStatus};
use crate::reports::TaskStats;
use crate::services::TaskService;

use super::{parse_choice, parse_optional_choice, parse_optional_date};

/// Task subcommands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Due date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        due: Option<String>,
        /// High, Medium or Low
        #[arg(short, long, default_value = "medium")]
        priority: String,
    },
    /// List tasks
    List {
        /// Match task titles
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Edit a task
    Edit {
        /// Task ID
        task: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        due: Option<String>,
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// Flip a task between Done and Not Done
    Toggle {
        /// Task ID
        task: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        task: String,
    },
    /// Set the status of several tasks at once
    BulkStatus {
        /// Task IDs
        #[arg(required = true)]
        tasks: Vec<String>,
        /// done or "not done"
        #[arg(short, long)]
        status: String,
    },
    /// Delete several tasks at once
    BulkDelete {
        /// Task IDs
        #[arg(required = true)]
        tasks: Vec<String>,
    },
}

/// Handle a task command
pub fn handle_task_command(console: &mut Console, cmd: TaskCommands) -> CreatorFlowResult<()> {
    match cmd {
        TaskCommands::Add { title, due, priority } => {
            let due = parse_optional_date(due.as_deref())?.unwrap_or_else(|| Local::now().date_naive());
            let priority = parse_choice::<Priority>(&priority)?;
            let task = TaskService::new(console.storage()).create(&title, due, priority)?;
            println!("Added task: {} (due {}, {})", task.title, task.due_date, task.priority);
            println!("  ID: {}", task.id);
        }

        TaskCommands::List { search } => {
            let tasks = TaskService::new(console.storage()).list(search.as_deref())?;
            println!("{}", format_task_list(&tasks));
            println!();
            println!("{}", format_task_stats(&TaskStats::from_tasks(&tasks)));
        }

        TaskCommands::Edit {
            task,
            title,
            due,
            priority,
        } => {
            let service = TaskService::new(console.storage());
            let found = service.find(&task)?;
            let patch = TaskPatch {
                title,
                due_date: parse_optional_date(due.as_deref())?,
                priority: parse_optional_choice::<Priority>(priority.as_deref())?,
            };
            if patch.is_empty() {
                println!("No changes specified. Use --title, --due or --priority.");
                return Ok(());
            }
            let updated = service.update(found.id, &patch)?;
            println!("Updated task: {}", updated.title);
        }

        TaskCommands::Toggle { task } => {
            let found = TaskService::new(console.storage()).find(&task)?;
            let toggled = console.toggle_task(found.id)?;
            println!("{}: {}", toggled.title, toggled.status);
        }

        TaskCommands::Delete { task } => {
            let service = TaskService::new(console.storage());
            let found = service.find(&task)?;
            let removed = service.delete(found.id)?;
            println!("Deleted task: {}", removed.title);
        }

        TaskCommands::BulkStatus { tasks, status } => {
            let status = parse_choice::<TaskStatus>(&status)?;
            select_tasks(console, &tasks)?;
            let count = console.bulk_set_task_status(status)?;
            println!("Marked {} tasks {}", count, status);
        }

        TaskCommands::BulkDelete { tasks } => {
            select_tasks(console, &tasks)?;
            let count = console.bulk_delete_tasks()?;
            println!("Deleted {} tasks", count);
        }
    }

    Ok(())
}

fn select_tasks(console: &mut Console, inputs: &[String]) -> CreatorFlowResult<()> {
    let service = TaskService::new(console.storage());
    let ids = inputs
        .iter()
        .map(|input| service.find(input).map(|t| t.id))
        .collect::<CreatorFlowResult<Vec<_>>>()?;
    console.task_selection.select_all(ids);
    Ok(())
}
