//! Delivery CLI commands
//!
//! Product shipments to influencers, including the bulk actions that run
//! through the console selection.

use chrono::Local;
use clap::Subcommand;

use crate::console::Console;
use crate::display::operations::{format_delivery_list, format_delivery_stats};
use crate::error::CreatorFlowResult;
use crate::models::{DeliveryPatch, DeliveryStatus, PaymentStatus};
use crate::reports::DeliveryStats;
use crate::services::{DeliveryFilter, DeliveryService, InfluencerService, NewDelivery, PaymentFilter};

use super::{parse_choice, parse_money, parse_optional_choice, parse_optional_date, parse_optional_money};

/// Delivery subcommands
#[derive(Subcommand)]
pub enum DeliveryCommands {
    /// Record a product sent to an influencer
    Add {
        /// Influencer handle or ID
        influencer: String,
        /// Product name
        product: String,
        #[arg(short, long)]
        quantity: Option<u32>,
        /// Date sent (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Product price
        #[arg(short, long, default_value = "0")]
        price: String,
        /// Mark as already paid
        #[arg(long)]
        paid: bool,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List deliveries
    List {
        /// Match influencer or product name
        #[arg(short, long)]
        search: Option<String>,
        /// all, paid or unpaid
        #[arg(short, long, default_value = "all")]
        payment: String,
    },
    /// Edit a delivery
    Edit {
        /// Delivery ID
        delivery: String,
        /// Move to another influencer (handle or ID)
        #[arg(long)]
        influencer: Option<String>,
        #[arg(long)]
        product: Option<String>,
        #[arg(short, long)]
        quantity: Option<u32>,
        #[arg(short, long)]
        date: Option<String>,
        /// Pending, Sent, Delivered or Cancelled
        #[arg(short, long)]
        status: Option<String>,
        /// Paid or Unpaid
        #[arg(long)]
        payment: Option<String>,
        #[arg(short, long)]
        price: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete a delivery
    Delete {
        /// Delivery ID
        delivery: String,
    },
    /// Set status and/or payment on several deliveries at once
    BulkUpdate {
        /// Delivery IDs
        #[arg(required = true)]
        deliveries: Vec<String>,
        #[arg(short, long)]
        status: Option<String>,
        #[arg(long)]
        payment: Option<String>,
    },
    /// Delete several deliveries at once
    BulkDelete {
        /// Delivery IDs
        #[arg(required = true)]
        deliveries: Vec<String>,
    },
    /// Paid / unpaid / total value of all deliveries
    Stats,
}

/// Handle a delivery command
pub fn handle_delivery_command(console: &mut Console, cmd: DeliveryCommands) -> CreatorFlowResult<()> {
    match cmd {
        DeliveryCommands::Add {
            influencer,
            product,
            quantity,
            date,
            price,
            paid,
            notes,
        } => {
            let influencer = InfluencerService::new(console.storage()).find(&influencer)?;
            let fields = NewDelivery {
                influencer_id: influencer.id,
                product_name: product,
                quantity,
                date_sent: parse_optional_date(date.as_deref())?
                    .unwrap_or_else(|| Local::now().date_naive()),
                price: parse_money(&price)?,
                payment_status: paid.then_some(PaymentStatus::Paid),
                notes,
            };
            let delivery =
                DeliveryService::new(console.storage(), console.settings()).create(fields)?;
            println!(
                "Recorded delivery of {} x{} to {}",
                delivery.product_name, delivery.quantity, delivery.influencer_name
            );
            println!("  ID: {}", delivery.id);
        }

        DeliveryCommands::List { search, payment } => {
            let filter = DeliveryFilter {
                search,
                payment: parse_choice::<PaymentFilter>(&payment)?,
            };
            console.refresh();
            let shown: Vec<_> = console
                .deliveries()
                .iter()
                .filter(|d| filter.matches(d))
                .cloned()
                .collect();
            let table = format_delivery_list(&shown, |d| {
                if console.delivery_pending(d.id) {
                    "*"
                } else if console.delivery_selection.contains(&d.id) {
                    "x"
                } else {
                    ""
                }
            });
            println!("{}", table);
            println!();
            println!("{}", format_delivery_stats(&DeliveryStats::from_deliveries(&shown)));
        }

        DeliveryCommands::Edit {
            delivery,
            influencer,
            product,
            quantity,
            date,
            status,
            payment,
            price,
            notes,
        } => {
            let service = DeliveryService::new(console.storage(), console.settings());
            let found = service.find(&delivery)?;
            let influencer_id = match influencer {
                Some(input) => Some(InfluencerService::new(console.storage()).find(&input)?.id),
                None => None,
            };
            let patch = DeliveryPatch {
                influencer_id,
                influencer_name: None,
                product_name: product,
                quantity,
                date_sent: parse_optional_date(date.as_deref())?,
                status: parse_optional_choice::<DeliveryStatus>(status.as_deref())?,
                payment_status: parse_optional_choice::<PaymentStatus>(payment.as_deref())?,
                price: parse_optional_money(price.as_deref())?,
                notes,
            };
            if patch.is_empty() {
                println!("No changes specified. Use --status, --payment, --price, etc.");
                return Ok(());
            }
            let updated = service.update(found.id, &patch)?;
            println!("Updated delivery {}", updated.id);
            println!("  Status: {}  Payment: {}", updated.status, updated.payment_status);
        }

        DeliveryCommands::Delete { delivery } => {
            let service = DeliveryService::new(console.storage(), console.settings());
            let found = service.find(&delivery)?;
            let removed = service.delete(found.id)?;
            println!(
                "Deleted delivery of {} to {}",
                removed.product_name, removed.influencer_name
            );
        }

        DeliveryCommands::BulkUpdate {
            deliveries,
            status,
            payment,
        } => {
            let patch = DeliveryPatch {
                status: parse_optional_choice::<DeliveryStatus>(status.as_deref())?,
                payment_status: parse_optional_choice::<PaymentStatus>(payment.as_deref())?,
                ..Default::default()
            };
            select_deliveries(console, &deliveries)?;
            let count = console.bulk_update_deliveries(&patch)?;
            println!("Updated {} deliveries", count);
        }

        DeliveryCommands::BulkDelete { deliveries } => {
            select_deliveries(console, &deliveries)?;
            let count = console.bulk_delete_deliveries()?;
            println!("Deleted {} deliveries", count);
        }

        DeliveryCommands::Stats => {
            console.refresh();
            println!("{}", format_delivery_stats(&console.delivery_stats()));
        }
    }

    Ok(())
}

fn select_deliveries(console: &mut Console, inputs: &[String]) -> CreatorFlowResult<()> {
    let service = DeliveryService::new(console.storage(), console.settings());
    let ids = inputs
        .iter()
        .map(|input| service.find(input).map(|d| d.id))
        .collect::<CreatorFlowResult<Vec<_>>>()?;
    console.delivery_selection.select_all(ids);
    Ok(())
}
