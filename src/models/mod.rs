//! Core data models for CreatorFlow
//!
//! Projects and their expense lines, the shared category registry, invoices,
//! and the operational records of the console: influencers, deliveries,
//! tasks and campaign transactions.

pub mod category;
pub mod delivery;
pub mod ids;
pub mod influencer;
pub mod invoice;
pub mod money;
pub mod project;
pub mod selection;
pub mod session;
pub mod task;
pub mod transaction;

pub use category::{CategoryError, CategoryRegistry, DEFAULT_CATEGORY};
pub use delivery::{Delivery, DeliveryPatch, DeliveryStatus, PaymentStatus};
pub use ids::{DeliveryId, ExpenseItemId, InfluencerId, ProjectId, TaskId, TransactionId};
pub use influencer::{Influencer, InfluencerPatch, InfluencerStatus};
pub use invoice::{InvoiceConfig, InvoiceDocument, InvoiceLine};
pub use money::Money;
pub use project::{
    ExpenseItem, ExpenseItemPatch, PaymentError, Project, ProjectStatus, ProjectSummary,
};
pub use selection::Selection;
pub use session::UserSession;
pub use task::{Priority, Task, TaskPatch, TaskStatus};
pub use transaction::{CampaignTransaction, SettlementStatus, SpendCategory};
