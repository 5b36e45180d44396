//! Admin moderation: the pending-content queue, review decisions with an
//! append-only audit trail, and subscription overrides.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ContentKind, ItemId, ModerationItem, ReviewAction, ReviewRecord, SubscriptionOverrideRecord,
};
pub use repository::{AdminAuditLog, AuditError, ModerationQueue, QueueError};
pub use router::moderation_router;
pub use service::{
    ModerationError, ModerationService, OverrideRequest, ReviewOutcome, ReviewRequest,
};
