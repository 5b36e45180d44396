use super::domain::{ItemId, ModerationItem, ReviewRecord, SubscriptionOverrideRecord};

/// Pending-review storage. Reviewing an item removes it from the queue;
/// the review's durable trace lives in the audit log, not here.
pub trait ModerationQueue: Send + Sync {
    fn enqueue(&self, item: ModerationItem) -> Result<(), QueueError>;
    /// Oldest-first snapshot of unreviewed items.
    fn pending(&self) -> Result<Vec<ModerationItem>, QueueError>;
    /// Removes and returns the item, or `None` when it was already taken.
    /// The `None` path is what makes repeated reviews idempotent.
    fn take(&self, id: &ItemId) -> Result<Option<ModerationItem>, QueueError>;
}

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("moderation queue unavailable: {0}")]
    Unavailable(String),
}

/// Append-only trail of admin decisions.
pub trait AdminAuditLog: Send + Sync {
    fn record_review(&self, record: ReviewRecord) -> Result<(), AuditError>;
    fn record_override(&self, record: SubscriptionOverrideRecord) -> Result<(), AuditError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit log unavailable: {0}")]
    Unavailable(String),
}
