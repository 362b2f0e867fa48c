//! Influencer roster service
//!
//! Roster edits plus the video production tracker. Deleting an influencer
//! leaves their deliveries and transactions in place; deliveries keep the
//! name they were written with.

use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::{Influencer, InfluencerId, InfluencerPatch};
use crate::storage::{Change, Storage};

pub struct InfluencerService<'a> {
    storage: &'a Storage,
}

impl<'a> InfluencerService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, name: &str, handle: &str, patch: &InfluencerPatch) -> CreatorFlowResult<Influencer> {
        let mut influencer = Influencer::new(name, handle);
        if !patch.is_empty() {
            influencer.apply(patch);
        }
        influencer
            .validate()
            .map_err(|e| CreatorFlowError::Validation(e.to_string()))?;

        let influencer = self.storage.influencers.create(influencer)?;
        self.storage
            .log_changes(&[Change::Created(influencer.clone())])?;
        tracing::info!(influencer = %influencer.id, handle = %influencer.handle, "Added influencer");
        Ok(influencer)
    }

    pub fn list(&self) -> CreatorFlowResult<Vec<Influencer>> {
        self.storage.influencers.snapshot()
    }

    pub fn get(&self, id: InfluencerId) -> CreatorFlowResult<Influencer> {
        self.storage
            .influencers
            .get(id)?
            .ok_or_else(|| CreatorFlowError::influencer_not_found(id.to_string()))
    }

    /// Find by id, short id, or handle with or without the '@'
    pub fn find(&self, identifier: &str) -> CreatorFlowResult<Influencer> {
        if let Some(influencer) = self.storage.influencers.find(identifier)? {
            return Ok(influencer);
        }
        let wanted = crate::models::influencer::normalize_handle(identifier).to_lowercase();
        self.storage
            .influencers
            .snapshot()?
            .into_iter()
            .find(|i| i.handle.to_lowercase() == wanted)
            .ok_or_else(|| CreatorFlowError::influencer_not_found(identifier))
    }

    pub fn update(&self, id: InfluencerId, patch: &InfluencerPatch) -> CreatorFlowResult<Influencer> {
        if patch.is_empty() {
            return Err(CreatorFlowError::Validation("Nothing to update".into()));
        }
        let mut influencer = self.get(id)?;
        influencer.apply(patch);
        influencer
            .validate()
            .map_err(|e| CreatorFlowError::Validation(e.to_string()))?;
        let influencer = self.save(influencer)?;
        tracing::info!(influencer = %id, "Updated influencer");
        Ok(influencer)
    }

    pub fn delete(&self, id: InfluencerId) -> CreatorFlowResult<Influencer> {
        let removed = self.storage.influencers.delete(id)?;
        self.storage
            .log_changes(&[Change::Deleted(removed.clone())])?;
        tracing::info!(influencer = %id, "Removed influencer");
        Ok(removed)
    }

    /// Click a slot of the production tracker (0-based)
    pub fn toggle_progress(&self, id: InfluencerId, index: u32) -> CreatorFlowResult<Influencer> {
        let mut influencer = self.get(id)?;
        if influencer.target_videos > 0 && index >= influencer.target_videos {
            return Err(CreatorFlowError::Validation(format!(
                "Slot {} is outside the target of {} videos",
                index.saturating_add(1),
                influencer.target_videos
            )));
        }
        influencer.toggle_progress(index);
        let influencer = self.save(influencer)?;
        tracing::debug!(influencer = %id, completed = influencer.completed_videos, "Progress changed");
        Ok(influencer)
    }

    pub fn reset_progress(&self, id: InfluencerId) -> CreatorFlowResult<Influencer> {
        let mut influencer = self.get(id)?;
        influencer.reset_progress();
        self.save(influencer)
    }

    fn save(&self, influencer: Influencer) -> CreatorFlowResult<Influencer> {
        let change = self.storage.influencers.update(influencer)?;
        self.storage.log_changes(std::slice::from_ref(&change))?;
        match change {
            Change::Updated { after, .. } => Ok(after),
            Change::Created(i) | Change::Deleted(i) => Ok(i),
        }
    }
}
