//! Influencer roster model
//!
//! Creators under contract, including the video production tracker
//! (target vs. completed videos).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::InfluencerId;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InfluencerStatus {
    #[default]
    Active,
    Negotiating,
    Archived,
}

impl fmt::Display for InfluencerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Negotiating => write!(f, "negotiating"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for InfluencerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "negotiating" => Ok(Self::Negotiating),
            "archived" => Ok(Self::Archived),
            other => Err(format!("Unknown influencer status: {}", other)),
        }
    }
}

/// A creator on the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Influencer {
    pub id: InfluencerId,
    pub name: String,
    /// Always starts with '@'
    pub handle: String,
    #[serde(default)]
    pub followers: u64,
    /// Percent, e.g. 8.4
    #[serde(default)]
    pub engagement_rate: f64,
    #[serde(default)]
    pub avg_views: u64,
    #[serde(default)]
    pub niche: String,
    #[serde(default)]
    pub status: InfluencerStatus,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub salary: Money,
    #[serde(default)]
    pub contract_type: String,
    #[serde(default)]
    pub target_videos: u32,
    #[serde(default)]
    pub completed_videos: u32,
    #[serde(default)]
    pub ad_types: Vec<String>,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub notes: String,
    pub updated_at: DateTime<Utc>,
}

/// Prefix a handle with '@' unless it already has one
pub fn normalize_handle(handle: &str) -> String {
    let handle = handle.trim();
    if handle.starts_with('@') {
        handle.to_string()
    } else {
        format!("@{}", handle)
    }
}

impl Influencer {
    pub fn new(name: impl Into<String>, handle: &str) -> Self {
        Self {
            id: InfluencerId::new(),
            name: name.into().trim().to_string(),
            handle: normalize_handle(handle),
            followers: 0,
            engagement_rate: 0.0,
            avg_views: 0,
            niche: String::new(),
            status: InfluencerStatus::Active,
            phone: String::new(),
            salary: Money::zero(),
            contract_type: String::new(),
            target_videos: 0,
            completed_videos: 0,
            ad_types: Vec::new(),
            platform: String::new(),
            notes: String::new(),
            updated_at: Utc::now(),
        }
    }

    /// Click on progress slot `index` (0-based): fills up to and including
    /// that slot, or steps back one when it is already the last filled slot.
    pub fn toggle_progress(&mut self, index: u32) {
        let clicked = index.saturating_add(1);
        self.completed_videos = if self.completed_videos == clicked {
            index
        } else {
            clicked
        };
        self.updated_at = Utc::now();
    }

    pub fn reset_progress(&mut self) {
        self.completed_videos = 0;
        self.updated_at = Utc::now();
    }

    /// Completed / target x 100, `None` without a target
    pub fn completion_percent(&self) -> Option<f64> {
        if self.target_videos == 0 {
            return None;
        }
        Some(self.completed_videos as f64 / self.target_videos as f64 * 100.0)
    }

    pub fn validate(&self) -> Result<(), InfluencerValidationError> {
        if self.name.trim().is_empty() {
            return Err(InfluencerValidationError::EmptyName);
        }
        if self.handle.trim_start_matches('@').trim().is_empty() {
            return Err(InfluencerValidationError::EmptyHandle);
        }
        if self.engagement_rate < 0.0 || !self.engagement_rate.is_finite() {
            return Err(InfluencerValidationError::InvalidEngagement);
        }
        Ok(())
    }
}

impl fmt::Display for Influencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.handle)
    }
}

/// Partial update for an influencer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfluencerPatch {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub followers: Option<u64>,
    pub engagement_rate: Option<f64>,
    pub avg_views: Option<u64>,
    pub niche: Option<String>,
    pub status: Option<InfluencerStatus>,
    pub phone: Option<String>,
    pub salary: Option<Money>,
    pub contract_type: Option<String>,
    pub target_videos: Option<u32>,
    pub ad_types: Option<Vec<String>>,
    pub platform: Option<String>,
    pub notes: Option<String>,
}

impl InfluencerPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Influencer {
    pub fn apply(&mut self, patch: &InfluencerPatch) {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(handle) = &patch.handle {
            self.handle = normalize_handle(handle);
        }
        if let Some(followers) = patch.followers {
            self.followers = followers;
        }
        if let Some(rate) = patch.engagement_rate {
            self.engagement_rate = rate;
        }
        if let Some(views) = patch.avg_views {
            self.avg_views = views;
        }
        if let Some(niche) = &patch.niche {
            self.niche = niche.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        if let Some(salary) = patch.salary {
            self.salary = salary;
        }
        if let Some(contract) = &patch.contract_type {
            self.contract_type = contract.clone();
        }
        if let Some(target) = patch.target_videos {
            self.target_videos = target;
        }
        if let Some(ad_types) = &patch.ad_types {
            self.ad_types = ad_types.clone();
        }
        if let Some(platform) = &patch.platform {
            self.platform = platform.clone();
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfluencerValidationError {
    EmptyName,
    EmptyHandle,
    InvalidEngagement,
}

impl fmt::Display for InfluencerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Influencer name cannot be empty"),
            Self::EmptyHandle => write!(f, "Handle cannot be empty"),
            Self::InvalidEngagement => write!(f, "Engagement rate must be a non-negative number"),
        }
    }
}

impl std::error::Error for InfluencerValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_normalization() {
        assert_eq!(normalize_handle("alex_tech_tips"), "@alex_tech_tips");
        assert_eq!(normalize_handle("@sarahstyle"), "@sarahstyle");
        assert_eq!(Influencer::new("Alex", " alex ").handle, "@alex");
    }

    #[test]
    fn test_toggle_progress() {
        let mut inf = Influencer::new("Alex", "alex");
        inf.target_videos = 10;

        inf.toggle_progress(3);
        assert_eq!(inf.completed_videos, 4);

        // Clicking the last filled slot steps back one
        inf.toggle_progress(3);
        assert_eq!(inf.completed_videos, 3);

        inf.toggle_progress(0);
        assert_eq!(inf.completed_videos, 1);

        inf.reset_progress();
        assert_eq!(inf.completed_videos, 0);
    }

    #[test]
    fn test_toggle_last_slot_without_target() {
        let mut inf = Influencer::new("Alex", "alex");
        inf.toggle_progress(u32::MAX);
        assert_eq!(inf.completed_videos, u32::MAX);
        inf.toggle_progress(u32::MAX);
        assert_eq!(inf.completed_videos, u32::MAX - 1);
    }

    #[test]
    fn test_completion_percent() {
        let mut inf = Influencer::new("Alex", "alex");
        assert_eq!(inf.completion_percent(), None);
        inf.target_videos = 10;
        inf.completed_videos = 4;
        assert_eq!(inf.completion_percent(), Some(40.0));
    }

    #[test]
    fn test_validation() {
        let inf = Influencer::new("", "x");
        assert_eq!(inf.validate(), Err(InfluencerValidationError::EmptyName));
        let inf = Influencer::new("Alex", "@");
        assert_eq!(inf.validate(), Err(InfluencerValidationError::EmptyHandle));
    }

    #[test]
    fn test_patch() {
        let mut inf = Influencer::new("Alex", "alex");
        inf.apply(&InfluencerPatch {
            handle: Some("alex2".into()),
            followers: Some(1_250_000),
            ..Default::default()
        });
        assert_eq!(inf.handle, "@alex2");
        assert_eq!(inf.followers, 1_250_000);
        assert_eq!(inf.name, "Alex");
    }
}
