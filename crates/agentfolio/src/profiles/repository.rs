use serde::Serialize;

use super::domain::{AgentProfile, Lead};

/// Storage abstraction over agent records so the service layer can be
/// exercised against in-memory fakes. The durable uniqueness constraint on
/// the slug lives here: `insert` is the sole arbiter of slug races.
pub trait ProfileRepository: Send + Sync {
    /// Fails with `SlugTaken` when the slug already exists; callers treat
    /// that as a retryable conflict, never a silent overwrite.
    fn insert(&self, profile: AgentProfile) -> Result<AgentProfile, ProfileStoreError>;
    fn update(&self, profile: AgentProfile) -> Result<(), ProfileStoreError>;
    fn fetch(&self, slug: &str) -> Result<Option<AgentProfile>, ProfileStoreError>;
    fn slug_exists(&self, slug: &str) -> Result<bool, ProfileStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("slug already in use")]
    SlugTaken,
    #[error("agent not found")]
    NotFound,
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for captured leads (the CRM/notification adapter).
pub trait LeadSink: Send + Sync {
    fn append(&self, slug: &str, lead: Lead) -> Result<(), LeadSinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LeadSinkError {
    #[error("lead sink unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized view returned from a successful terminal commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitReceipt {
    pub slug: String,
}
