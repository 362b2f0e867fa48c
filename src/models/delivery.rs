//! Delivery model
//!
//! Product shipments sent to influencers, with a shipping status and a
//! payment status. Neither status enforces a transition graph unless the
//! forward-only pipeline is switched on in settings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{DeliveryId, InfluencerId};
use super::money::Money;

/// Shipping status of a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeliveryStatus {
    #[default]
    Pending,
    Sent,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    pub fn all() -> &'static [Self] {
        &[Self::Pending, Self::Sent, Self::Delivered, Self::Cancelled]
    }

    /// Forward-only pipeline: Pending -> Sent -> Delivered, Cancelled from
    /// Pending or Sent. Staying in the same state is always allowed.
    pub fn can_advance_to(&self, next: DeliveryStatus) -> bool {
        use DeliveryStatus::*;
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Pending, Sent)
                | (Pending, Delivered)
                | (Sent, Delivered)
                | (Pending, Cancelled)
                | (Sent, Cancelled)
        )
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Sent => write!(f, "Sent"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("Unknown delivery status: {}", other)),
        }
    }
}

/// Whether a delivery has been paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paid => write!(f, "Paid"),
            Self::Unpaid => write!(f, "Unpaid"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paid" => Ok(Self::Paid),
            "unpaid" => Ok(Self::Unpaid),
            other => Err(format!("Unknown payment status: {}", other)),
        }
    }
}

/// A product shipment to an influencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: DeliveryId,

    pub influencer_id: InfluencerId,

    /// Copied from the roster at write time; "Unknown" if the influencer is gone
    pub influencer_name: String,

    pub product_name: String,

    pub quantity: u32,

    pub date_sent: NaiveDate,

    #[serde(default)]
    pub status: DeliveryStatus,

    #[serde(default)]
    pub payment_status: PaymentStatus,

    pub price: Money,

    #[serde(default)]
    pub notes: String,

    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    pub fn new(
        influencer_id: InfluencerId,
        influencer_name: impl Into<String>,
        product_name: impl Into<String>,
        date_sent: NaiveDate,
    ) -> Self {
        Self {
            id: DeliveryId::new(),
            influencer_id,
            influencer_name: influencer_name.into(),
            product_name: product_name.into(),
            quantity: 1,
            date_sent,
            status: DeliveryStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            price: Money::zero(),
            notes: String::new(),
            updated_at: Utc::now(),
        }
    }

    /// Case-insensitive search over influencer and product names
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.influencer_name.to_lowercase().contains(&term)
            || self.product_name.to_lowercase().contains(&term)
    }

    /// Apply a partial update (influencer name must already be resolved)
    pub fn apply(&mut self, patch: &DeliveryPatch) {
        if let Some(id) = patch.influencer_id {
            self.influencer_id = id;
        }
        if let Some(name) = &patch.influencer_name {
            self.influencer_name = name.clone();
        }
        if let Some(product) = &patch.product_name {
            self.product_name = product.clone();
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(date) = patch.date_sent {
            self.date_sent = date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(payment_status) = patch.payment_status {
            self.payment_status = payment_status;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), DeliveryValidationError> {
        if self.product_name.trim().is_empty() {
            return Err(DeliveryValidationError::EmptyProduct);
        }
        if self.quantity == 0 {
            return Err(DeliveryValidationError::ZeroQuantity);
        }
        if self.price.is_negative() {
            return Err(DeliveryValidationError::NegativePrice);
        }
        Ok(())
    }
}

/// Partial-field update for one or many deliveries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryPatch {
    pub influencer_id: Option<InfluencerId>,
    pub influencer_name: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<u32>,
    pub date_sent: Option<NaiveDate>,
    pub status: Option<DeliveryStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub price: Option<Money>,
    pub notes: Option<String>,
}

impl DeliveryPatch {
    pub fn status(status: DeliveryStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn payment_status(payment_status: PaymentStatus) -> Self {
        Self {
            payment_status: Some(payment_status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Validation errors for deliveries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryValidationError {
    EmptyProduct,
    ZeroQuantity,
    NegativePrice,
}

impl fmt::Display for DeliveryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyProduct => write!(f, "Product name cannot be empty"),
            Self::ZeroQuantity => write!(f, "Quantity must be at least 1"),
            Self::NegativePrice => write!(f, "Price cannot be negative"),
        }
    }
}

impl std::error::Error for DeliveryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Delivery {
        Delivery::new(
            InfluencerId::new(),
            "Sarah Chen",
            "Glow Cream",
            NaiveDate::from_ymd_opt(2024, 1, 25).unwrap(),
        )
    }

    #[test]
    fn test_defaults() {
        let delivery = sample();
        assert_eq!(delivery.quantity, 1);
        assert_eq!(delivery.status, DeliveryStatus::Pending);
        assert_eq!(delivery.payment_status, PaymentStatus::Unpaid);
        assert!(delivery.validate().is_ok());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let delivery = sample();
        assert!(delivery.matches_search("sarah"));
        assert!(delivery.matches_search("GLOW"));
        assert!(!delivery.matches_search("alex"));
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut delivery = sample();
        delivery.apply(&DeliveryPatch::payment_status(PaymentStatus::Paid));
        assert_eq!(delivery.payment_status, PaymentStatus::Paid);
        assert_eq!(delivery.status, DeliveryStatus::Pending);
        assert_eq!(delivery.product_name, "Glow Cream");
    }

    #[test]
    fn test_pipeline_transitions() {
        use DeliveryStatus::*;
        assert!(Pending.can_advance_to(Sent));
        assert!(Sent.can_advance_to(Delivered));
        assert!(Sent.can_advance_to(Cancelled));
        assert!(Delivered.can_advance_to(Delivered));
        assert!(!Delivered.can_advance_to(Pending));
        assert!(!Delivered.can_advance_to(Cancelled));
        assert!(!Cancelled.can_advance_to(Sent));
        assert!(!Sent.can_advance_to(Pending));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("delivered".parse::<DeliveryStatus>(), Ok(DeliveryStatus::Delivered));
        assert_eq!("Canceled".parse::<DeliveryStatus>(), Ok(DeliveryStatus::Cancelled));
        assert!("lost".parse::<DeliveryStatus>().is_err());
        assert_eq!("PAID".parse::<PaymentStatus>(), Ok(PaymentStatus::Paid));
    }

    #[test]
    fn test_validation() {
        let mut delivery = sample();
        delivery.quantity = 0;
        assert_eq!(delivery.validate(), Err(DeliveryValidationError::ZeroQuantity));
        delivery.quantity = 1;
        delivery.product_name = " ".into();
        assert_eq!(delivery.validate(), Err(DeliveryValidationError::EmptyProduct));
    }
}
