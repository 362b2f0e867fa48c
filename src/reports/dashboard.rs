//! Dashboard Report
//!
//! Headline numbers for the roster and campaign spend.

use crate::error::CreatorFlowResult;
use crate::models::{CampaignTransaction, Influencer, Money, SettlementStatus};
use crate::storage::Storage;

/// Roster and spend totals
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    /// Sum of followers across the roster
    pub total_reach: u64,
    /// Mean engagement rate in percent; 0 for an empty roster
    pub average_engagement: f64,
    /// Paid campaign transactions
    pub spend: Money,
    /// Pending campaign transactions
    pub pending: Money,
    /// Overdue campaign transactions
    pub overdue: Money,
    pub influencer_count: usize,
}

impl DashboardReport {
    /// Compute from records already in hand (e.g. projections)
    pub fn from_records(influencers: &[Influencer], transactions: &[CampaignTransaction]) -> Self {
        let total_reach = influencers.iter().map(|i| i.followers).sum();
        let average_engagement = if influencers.is_empty() {
            0.0
        } else {
            influencers.iter().map(|i| i.engagement_rate).sum::<f64>() / influencers.len() as f64
        };

        let sum_by = |status: SettlementStatus| -> Money {
            transactions
                .iter()
                .filter(|t| t.status == status)
                .map(|t| t.amount)
                .sum()
        };

        Self {
            total_reach,
            average_engagement,
            spend: sum_by(SettlementStatus::Paid),
            pending: sum_by(SettlementStatus::Pending),
            overdue: sum_by(SettlementStatus::Overdue),
            influencer_count: influencers.len(),
        }
    }

    pub fn generate(storage: &Storage) -> CreatorFlowResult<Self> {
        Ok(Self::from_records(
            &storage.influencers.snapshot()?,
            &storage.transactions.snapshot()?,
        ))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str("Dashboard\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("Total Reach:        {:>20}\n", format_count(self.total_reach)));
        output.push_str(&format!("Avg. Engagement:    {:>19.1}%\n", self.average_engagement));
        output.push_str(&format!("Spend (paid):       {:>20}\n", self.spend));
        output.push_str(&format!("Pending:            {:>20}\n", self.pending));
        if self.overdue.is_positive() {
            output.push_str(&format!("Overdue:            {:>20}\n", self.overdue));
        }
        output.push_str(&format!("Influencers:        {:>20}\n", self.influencer_count));
        output
    }
}

/// 1.2M / 85.0K style counts
pub fn format_count(n: u64) -> String {
    match n {
        n if n >= 1_000_000 => format!("{:.1}M", n as f64 / 1_000_000.0),
        n if n >= 1_000 => format!("{:.1}K", n as f64 / 1_000.0),
        n => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InfluencerId, SpendCategory};
    use chrono::NaiveDate;

    fn txn(units: i64, status: SettlementStatus) -> CampaignTransaction {
        let mut t = CampaignTransaction::new(
            InfluencerId::new(),
            Money::from_units(units),
            NaiveDate::from_ymd_opt(2023, 10, 12).unwrap(),
            SpendCategory::Commission,
        );
        t.status = status;
        t
    }

    #[test]
    fn test_empty_roster_has_zero_engagement() {
        let report = DashboardReport::from_records(&[], &[]);
        assert_eq!(report.average_engagement, 0.0);
        assert_eq!(report.total_reach, 0);
        assert_eq!(report.spend, Money::zero());
    }

    #[test]
    fn test_totals() {
        let mut alex = Influencer::new("Alex Rivera", "alextech");
        alex.followers = 120_000;
        alex.engagement_rate = 4.5;
        let mut sarah = Influencer::new("Sarah Chen", "sarahstyle");
        sarah.followers = 85_000;
        sarah.engagement_rate = 8.5;

        let report = DashboardReport::from_records(
            &[alex, sarah],
            &[
                txn(2500, SettlementStatus::Paid),
                txn(500, SettlementStatus::Pending),
                txn(100, SettlementStatus::Overdue),
            ],
        );
        assert_eq!(report.total_reach, 205_000);
        assert!((report.average_engagement - 6.5).abs() < f64::EPSILON);
        assert_eq!(report.spend, Money::from_units(2500));
        assert_eq!(report.pending, Money::from_units(500));
        assert_eq!(report.influencer_count, 2);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(950), "950");
        assert_eq!(format_count(85_000), "85.0K");
        assert_eq!(format_count(1_250_000), "1.2M");
    }
}
