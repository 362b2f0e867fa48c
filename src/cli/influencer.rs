//! Influencer roster CLI commands

use clap::{Args, Subcommand};

use crate::console::Console;
use crate::display::operations::{format_influencer_details, format_influencer_list};
use crate::error::CreatorFlowResult;
use crate::models::{InfluencerPatch, InfluencerStatus};
use crate::services::InfluencerService;

use super::{parse_optional_choice, parse_optional_money};

/// Optional roster fields shared by `add` and `edit`
#[derive(Args)]
pub struct InfluencerFields {
    #[arg(long)]
    followers: Option<u64>,
    /// Engagement rate in percent (e.g., 4.5)
    #[arg(long)]
    engagement: Option<f64>,
    #[arg(long)]
    avg_views: Option<u64>,
    #[arg(long)]
    niche: Option<String>,
    /// active, negotiating or archived
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    salary: Option<String>,
    #[arg(long)]
    contract: Option<String>,
    /// Number of videos contracted
    #[arg(long)]
    target_videos: Option<u32>,
    /// Comma-separated ad formats (e.g., "reel,story")
    #[arg(long, value_delimiter = ',')]
    ad_types: Option<Vec<String>>,
    #[arg(long)]
    platform: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl InfluencerFields {
    fn into_patch(self) -> CreatorFlowResult<InfluencerPatch> {
        Ok(InfluencerPatch {
            followers: self.followers,
            engagement_rate: self.engagement,
            avg_views: self.avg_views,
            niche: self.niche,
            status: parse_optional_choice::<InfluencerStatus>(self.status.as_deref())?,
            phone: self.phone,
            salary: parse_optional_money(self.salary.as_deref())?,
            contract_type: self.contract,
            target_videos: self.target_videos,
            ad_types: self.ad_types,
            platform: self.platform,
            notes: self.notes,
            ..Default::default()
        })
    }
}

/// Influencer subcommands
#[derive(Subcommand)]
pub enum InfluencerCommands {
    /// Add an influencer to the roster
    Add {
        /// Display name
        name: String,
        /// Social handle ('@' is added when missing)
        handle: String,
        #[command(flatten)]
        fields: InfluencerFields,
    },
    /// List the roster
    List,
    /// Show one influencer with the production tracker
    Show {
        /// Handle or ID
        influencer: String,
    },
    /// Edit an influencer
    Edit {
        /// Handle or ID
        influencer: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        handle: Option<String>,
        #[command(flatten)]
        fields: InfluencerFields,
    },
    /// Remove an influencer (deliveries and spend are kept)
    Delete {
        /// Handle or ID
        influencer: String,
    },
    /// Click a slot of the production tracker
    Progress {
        /// Handle or ID
        influencer: String,
        /// Slot number, starting at 1
        slot: u32,
    },
    /// Clear the production tracker
    Reset {
        /// Handle or ID
        influencer: String,
    },
}

/// Handle an influencer command
pub fn handle_influencer_command(console: &Console, cmd: InfluencerCommands) -> CreatorFlowResult<()> {
    let service = InfluencerService::new(console.storage());

    match cmd {
        InfluencerCommands::Add { name, handle, fields } => {
            let influencer = service.create(&name, &handle, &fields.into_patch()?)?;
            println!("Added influencer: {}", influencer);
            println!("  ID: {}", influencer.id);
        }

        InfluencerCommands::List => {
            println!("{}", format_influencer_list(&service.list()?));
        }

        InfluencerCommands::Show { influencer } => {
            let found = service.find(&influencer)?;
            print!("{}", format_influencer_details(&found));
        }

        InfluencerCommands::Edit {
            influencer,
            name,
            handle,
            fields,
        } => {
            let found = service.find(&influencer)?;
            let patch = InfluencerPatch {
                name,
                handle,
                ..fields.into_patch()?
            };
            if patch.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }
            let updated = service.update(found.id, &patch)?;
            println!("Updated influencer: {}", updated);
        }

        InfluencerCommands::Delete { influencer } => {
            let found = service.find(&influencer)?;
            let removed = service.delete(found.id)?;
            println!("Removed influencer: {}", removed);
        }

        InfluencerCommands::Progress { influencer, slot } => {
            if slot == 0 {
                return Err(crate::error::CreatorFlowError::Validation(
                    "Slots are numbered from 1".into(),
                ));
            }
            let found = service.find(&influencer)?;
            let updated = service.toggle_progress(found.id, slot - 1)?;
            println!(
                "{}: {}/{} videos completed",
                updated.name, updated.completed_videos, updated.target_videos
            );
        }

        InfluencerCommands::Reset { influencer } => {
            let found = service.find(&influencer)?;
            let updated = service.reset_progress(found.id)?;
            println!("Reset production tracker for {}", updated.name);
        }
    }

    Ok(())
}
