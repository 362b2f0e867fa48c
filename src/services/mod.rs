//! Service layer for CreatorFlow
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields, and cross-entity operations.

pub mod category;
pub mod delivery;
pub mod influencer;
pub mod invoice;
pub mod project;
pub mod session;
pub mod task;
pub mod transaction;

pub use category::{CategoryRemoval, CategoryService, OrphanedItem};
pub use delivery::{DeliveryFilter, DeliveryService, NewDelivery, PaymentFilter};
pub use influencer::InfluencerService;
pub use invoice::{
    share_with_fallback, ClipboardShare, CommandShare, InvoiceService, PrintShare, ShareError,
    ShareTarget,
};
pub use project::{NewExpenseItem, ProjectService};
pub use session::SessionService;
pub use task::TaskService;
pub use transaction::TransactionService;
