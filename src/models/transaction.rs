//! Campaign transaction model
//!
//! Money paid (or owed) to influencers: commissions, ad spend, production
//! costs and gifts. Feeds the dashboard spend figures.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{InfluencerId, TransactionId};
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendCategory {
    Commission,
    AdSpend,
    Production,
    Gift,
}

impl fmt::Display for SpendCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commission => write!(f, "commission"),
            Self::AdSpend => write!(f, "ad_spend"),
            Self::Production => write!(f, "production"),
            Self::Gift => write!(f, "gift"),
        }
    }
}

impl FromStr for SpendCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "commission" => Ok(Self::Commission),
            "ad_spend" => Ok(Self::AdSpend),
            "production" => Ok(Self::Production),
            "gift" => Ok(Self::Gift),
            other => Err(format!("Unknown spend category: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paid => write!(f, "paid"),
            Self::Pending => write!(f, "pending"),
            Self::Overdue => write!(f, "overdue"),
        }
    }
}

impl FromStr for SettlementStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paid" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            other => Err(format!("Unknown transaction status: {}", other)),
        }
    }
}

/// A payment to or for an influencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignTransaction {
    pub id: TransactionId,
    pub influencer_id: InfluencerId,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: SpendCategory,
    #[serde(default)]
    pub status: SettlementStatus,
    #[serde(default)]
    pub description: String,
    pub updated_at: DateTime<Utc>,
}

impl CampaignTransaction {
    pub fn new(
        influencer_id: InfluencerId,
        amount: Money,
        date: NaiveDate,
        category: SpendCategory,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            influencer_id,
            amount,
            date,
            category,
            status: SettlementStatus::Pending,
            description: String::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.amount.is_positive() {
            return Err("Transaction amount must be greater than zero".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_and_serde() {
        assert_eq!("ad spend".parse::<SpendCategory>(), Ok(SpendCategory::AdSpend));
        let json = serde_json::to_string(&SpendCategory::AdSpend).unwrap();
        assert_eq!(json, "\"ad_spend\"");
    }

    #[test]
    fn test_new_is_pending() {
        let txn = CampaignTransaction::new(
            InfluencerId::new(),
            Money::from_units(2500),
            NaiveDate::from_ymd_opt(2023, 10, 12).unwrap(),
            SpendCategory::Commission,
        );
        assert_eq!(txn.status, SettlementStatus::Pending);
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_zero_amount_invalid() {
        let txn = CampaignTransaction::new(
            InfluencerId::new(),
            Money::zero(),
            NaiveDate::from_ymd_opt(2023, 10, 12).unwrap(),
            SpendCategory::Gift,
        );
        assert!(txn.validate().is_err());
    }
}
