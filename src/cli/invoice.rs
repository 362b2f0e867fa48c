//! Invoice CLI commands

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::console::Console;
use crate::error::CreatorFlowResult;
use crate::models::InvoiceConfig;
use crate::services::{InvoiceService, PrintShare, ProjectService, ShareTarget};

use super::{open_output, parse_optional_date, parse_optional_money};

/// Overrides for the invoice defaults
#[derive(Args)]
pub struct InvoiceArgs {
    /// Project title or ID
    project: String,
    /// Client name (defaults to "General Client")
    #[arg(short, long, default_value = "")]
    client: String,
    /// Invoice number (generated when omitted)
    #[arg(short, long)]
    number: Option<String>,
    /// Invoice date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<String>,
    /// Due date (YYYY-MM-DD, defaults to date + configured days)
    #[arg(long)]
    due: Option<String>,
    /// Flat discount
    #[arg(long)]
    discount: Option<String>,
    /// Logo URL
    #[arg(long)]
    logo: Option<String>,
    /// Payment terms
    #[arg(long)]
    terms: Option<String>,
}

impl InvoiceArgs {
    fn config(&self) -> CreatorFlowResult<InvoiceConfig> {
        Ok(InvoiceConfig {
            client_name: self.client.clone(),
            invoice_number: self.number.clone(),
            invoice_date: parse_optional_date(self.date.as_deref())?,
            due_date: parse_optional_date(self.due.as_deref())?,
            discount: parse_optional_money(self.discount.as_deref())?,
            logo_url: self.logo.clone(),
            payment_terms: self.terms.clone(),
        })
    }
}

/// Invoice subcommands
#[derive(Subcommand)]
pub enum InvoiceCommands {
    /// Print an invoice for a project
    Show {
        #[command(flatten)]
        args: InvoiceArgs,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Share the invoice summary (share command, clipboard, or terminal)
    Share {
        #[command(flatten)]
        args: InvoiceArgs,
    },
}

/// Handle an invoice command
pub fn handle_invoice_command(console: &Console, cmd: InvoiceCommands) -> CreatorFlowResult<()> {
    let projects = ProjectService::new(console.storage(), console.settings());
    let service = InvoiceService::new(console.storage(), console.settings());

    match cmd {
        InvoiceCommands::Show { args, output } => {
            let project = projects.find(&args.project)?;
            let invoice = service.build(project.id, &args.config()?)?;
            let mut out = open_output(output.as_deref())?;
            service.print(&invoice, &mut out)?;
            out.flush()?;
            if let Some(path) = output {
                println!("Wrote invoice {} to {}", invoice.number, path.display());
            }
        }

        InvoiceCommands::Share { args } => {
            let project = projects.find(&args.project)?;
            let invoice = service.build(project.id, &args.config()?)?;

            let (command, clipboard) = service.default_targets();
            let terminal = PrintShare::new(std::io::stdout());
            let targets: [&dyn ShareTarget; 3] = [&command, &clipboard, &terminal];

            let used = service.share(&invoice, &targets)?;
            if used != "terminal" {
                println!("Shared invoice {} via {}", invoice.number, used);
            }
        }
    }

    Ok(())
}
