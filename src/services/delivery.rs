//! Delivery service
//!
//! Single and bulk edits of product shipments. Bulk edits run as one
//! collection batch, so either every selected delivery changes or none do.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::{
    Delivery, DeliveryId, DeliveryPatch, InfluencerId, Money, PaymentStatus, Selection,
};
use crate::storage::{Change, Storage, WriteOp};

/// Name stored when the influencer cannot be found
pub const UNKNOWN_INFLUENCER: &str = "Unknown";

/// Payment filter for delivery listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentFilter {
    #[default]
    All,
    Paid,
    Unpaid,
}

impl PaymentFilter {
    pub fn admits(&self, status: PaymentStatus) -> bool {
        match self {
            Self::All => true,
            Self::Paid => status == PaymentStatus::Paid,
            Self::Unpaid => status == PaymentStatus::Unpaid,
        }
    }
}

impl FromStr for PaymentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "paid" => Ok(Self::Paid),
            "unpaid" => Ok(Self::Unpaid),
            other => Err(format!("Unknown payment filter: {}", other)),
        }
    }
}

/// Search term plus payment filter
#[derive(Debug, Clone, Default)]
pub struct DeliveryFilter {
    pub search: Option<String>,
    pub payment: PaymentFilter,
}

impl DeliveryFilter {
    pub fn matches(&self, delivery: &Delivery) -> bool {
        let term_ok = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => delivery.matches_search(term),
            _ => true,
        };
        term_ok && self.payment.admits(delivery.payment_status)
    }
}

/// Fields for a new delivery
#[derive(Debug, Clone)]
pub struct NewDelivery {
    pub influencer_id: InfluencerId,
    pub product_name: String,
    pub quantity: Option<u32>,
    pub date_sent: NaiveDate,
    pub price: Money,
    pub payment_status: Option<PaymentStatus>,
    pub notes: Option<String>,
}

pub struct DeliveryService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> DeliveryService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    pub fn create(&self, fields: NewDelivery) -> CreatorFlowResult<Delivery> {
        let name = self.influencer_name(fields.influencer_id)?;
        let mut delivery = Delivery::new(
            fields.influencer_id,
            name,
            fields.product_name.trim(),
            fields.date_sent,
        );
        delivery.price = fields.price;
        if let Some(quantity) = fields.quantity {
            delivery.quantity = quantity;
        }
        if let Some(payment_status) = fields.payment_status {
            delivery.payment_status = payment_status;
        }
        if let Some(notes) = fields.notes {
            delivery.notes = notes;
        }
        delivery
            .validate()
            .map_err(|e| CreatorFlowError::Validation(e.to_string()))?;

        let delivery = self.storage.deliveries.create(delivery)?;
        self.storage
            .log_changes(&[Change::Created(delivery.clone())])?;
        tracing::info!(delivery = %delivery.id, product = %delivery.product_name, "Created delivery");
        Ok(delivery)
    }

    /// Deliveries matching the filter, in stored order
    pub fn list(&self, filter: &DeliveryFilter) -> CreatorFlowResult<Vec<Delivery>> {
        Ok(self
            .storage
            .deliveries
            .snapshot()?
            .into_iter()
            .filter(|d| filter.matches(d))
            .collect())
    }

    pub fn find(&self, identifier: &str) -> CreatorFlowResult<Delivery> {
        self.storage
            .deliveries
            .find(identifier)?
            .ok_or_else(|| CreatorFlowError::delivery_not_found(identifier))
    }

    pub fn update(&self, id: DeliveryId, patch: &DeliveryPatch) -> CreatorFlowResult<Delivery> {
        if patch.is_empty() {
            return Err(CreatorFlowError::Validation("Nothing to update".into()));
        }
        let current = self
            .storage
            .deliveries
            .get(id)?
            .ok_or_else(|| CreatorFlowError::delivery_not_found(id.to_string()))?;
        let updated = self.patched(current, &self.resolve(patch)?)?;

        let change = self.storage.deliveries.update(updated)?;
        self.storage.log_changes(std::slice::from_ref(&change))?;
        tracing::info!(delivery = %id, "Updated delivery");
        match change {
            Change::Updated { after, .. } => Ok(after),
            Change::Created(d) | Change::Deleted(d) => Ok(d),
        }
    }

    pub fn delete(&self, id: DeliveryId) -> CreatorFlowResult<Delivery> {
        let removed = self.storage.deliveries.delete(id)?;
        self.storage
            .log_changes(&[Change::Deleted(removed.clone())])?;
        tracing::info!(delivery = %id, "Deleted delivery");
        Ok(removed)
    }

    /// Apply one patch to every selected delivery
    ///
    /// The selection is cleared only when the whole batch commits.
    pub fn bulk_update(
        &self,
        selection: &mut Selection<DeliveryId>,
        patch: &DeliveryPatch,
    ) -> CreatorFlowResult<usize> {
        if selection.is_empty() {
            return Err(CreatorFlowError::Validation("No deliveries selected".into()));
        }
        if patch.is_empty() {
            return Err(CreatorFlowError::Validation("Nothing to update".into()));
        }
        let patch = self.resolve(patch)?;

        let mut ops = Vec::with_capacity(selection.len());
        for id in selection.ids() {
            let current = self
                .storage
                .deliveries
                .get(id)?
                .ok_or_else(|| CreatorFlowError::delivery_not_found(id.to_string()))?;
            ops.push(WriteOp::Update(self.patched(current, &patch)?));
        }

        let count = self.commit(ops)?;
        selection.clear();
        tracing::info!(count, "Bulk updated deliveries");
        Ok(count)
    }

    pub fn bulk_delete(&self, selection: &mut Selection<DeliveryId>) -> CreatorFlowResult<usize> {
        if selection.is_empty() {
            return Err(CreatorFlowError::Validation("No deliveries selected".into()));
        }
        let ops = selection.ids().into_iter().map(WriteOp::Delete).collect();

        let count = self.commit(ops)?;
        selection.clear();
        tracing::info!(count, "Bulk deleted deliveries");
        Ok(count)
    }

    fn commit(&self, ops: Vec<WriteOp<Delivery>>) -> CreatorFlowResult<usize> {
        let changes = self.storage.deliveries.commit_batch(ops).map_err(|e| {
            tracing::warn!(error = %e, "Delivery batch rejected");
            e
        })?;
        self.storage.log_changes(&changes)?;
        Ok(changes.len())
    }

    /// Fill in the influencer name when the patch moves the delivery
    fn resolve(&self, patch: &DeliveryPatch) -> CreatorFlowResult<DeliveryPatch> {
        let mut patch = patch.clone();
        if let Some(influencer_id) = patch.influencer_id {
            patch.influencer_name = Some(self.influencer_name(influencer_id)?);
        }
        Ok(patch)
    }

    fn patched(&self, mut delivery: Delivery, patch: &DeliveryPatch) -> CreatorFlowResult<Delivery> {
        if let Some(next) = patch.status {
            if self.settings.enforce_delivery_pipeline && !delivery.status.can_advance_to(next) {
                tracing::warn!(delivery = %delivery.id, from = %delivery.status, to = %next, "Rejected status change");
                return Err(CreatorFlowError::InvalidTransition {
                    from: delivery.status.to_string(),
                    to: next.to_string(),
                });
            }
        }
        delivery.apply(patch);
        delivery
            .validate()
            .map_err(|e| CreatorFlowError::Validation(e.to_string()))?;
        Ok(delivery)
    }

    fn influencer_name(&self, id: InfluencerId) -> CreatorFlowResult<String> {
        Ok(match self.storage.influencers.get(id)? {
            Some(influencer) => influencer.name,
            None => {
                tracing::warn!(influencer = %id, "Delivery references unknown influencer");
                UNKNOWN_INFLUENCER.to_string()
            }
        })
    }
}
