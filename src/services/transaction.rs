//! Campaign transaction service

use chrono::{NaiveDate, Utc};

use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::{
    CampaignTransaction, InfluencerId, Money, SettlementStatus, SpendCategory, TransactionId,
};
use crate::storage::{Change, Storage};

pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record spend against an influencer on the roster
    pub fn create(
        &self,
        influencer_id: InfluencerId,
        amount: Money,
        date: NaiveDate,
        category: SpendCategory,
        description: Option<String>,
    ) -> CreatorFlowResult<CampaignTransaction> {
        if self.storage.influencers.get(influencer_id)?.is_none() {
            return Err(CreatorFlowError::influencer_not_found(influencer_id.to_string()));
        }

        let mut txn = CampaignTransaction::new(influencer_id, amount, date, category);
        if let Some(description) = description {
            txn.description = description;
        }
        txn.validate().map_err(CreatorFlowError::Validation)?;

        let txn = self.storage.transactions.create(txn)?;
        self.storage.log_changes(&[Change::Created(txn.clone())])?;
        tracing::info!(transaction = %txn.id, amount = %txn.amount, "Recorded campaign spend");
        Ok(txn)
    }

    /// Newest date first
    pub fn list(&self, influencer: Option<InfluencerId>) -> CreatorFlowResult<Vec<CampaignTransaction>> {
        let mut txns: Vec<_> = self
            .storage
            .transactions
            .snapshot()?
            .into_iter()
            .filter(|t| influencer.map_or(true, |id| t.influencer_id == id))
            .collect();
        txns.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(txns)
    }

    pub fn find(&self, identifier: &str) -> CreatorFlowResult<CampaignTransaction> {
        self.storage
            .transactions
            .find(identifier)?
            .ok_or_else(|| CreatorFlowError::transaction_not_found(identifier))
    }

    pub fn set_status(&self, id: TransactionId, status: SettlementStatus) -> CreatorFlowResult<CampaignTransaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| CreatorFlowError::transaction_not_found(id.to_string()))?;
        txn.status = status;
        txn.updated_at = Utc::now();

        let change = self.storage.transactions.update(txn)?;
        self.storage.log_changes(std::slice::from_ref(&change))?;
        tracing::info!(transaction = %id, status = %status, "Changed settlement status");
        match change {
            Change::Updated { after, .. } => Ok(after),
            Change::Created(t) | Change::Deleted(t) => Ok(t),
        }
    }

    pub fn delete(&self, id: TransactionId) -> CreatorFlowResult<CampaignTransaction> {
        let removed = self.storage.transactions.delete(id)?;
        self.storage.log_changes(&[Change::Deleted(removed.clone())])?;
        tracing::info!(transaction = %id, "Deleted campaign spend");
        Ok(removed)
    }
}
