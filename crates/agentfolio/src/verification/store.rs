use chrono::{DateTime, Utc};

use super::domain::PhoneNumber;

/// One-time code challenge tracked for a single phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub phone: PhoneNumber,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Challenge {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Storage abstraction for active challenges.
///
/// At most one challenge exists per phone number; `put` replaces any
/// previous entry for the same number.
pub trait ChallengeStore: Send + Sync {
    fn put(&self, challenge: Challenge) -> Result<(), ChallengeStoreError>;
    fn active(&self, phone: &PhoneNumber) -> Result<Option<Challenge>, ChallengeStoreError>;
    /// Removes the challenge for `phone` when `code` matches an unexpired
    /// entry, returning whether anything was consumed. The check and the
    /// removal must be one atomic step so a code is accepted exactly once;
    /// a mismatched code leaves the challenge in place.
    fn consume(
        &self,
        phone: &PhoneNumber,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ChallengeStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ChallengeStoreError {
    #[error("challenge store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound delivery hook (e.g. the WhatsApp transport adapter).
pub trait CodeSender: Send + Sync {
    fn deliver(&self, phone: &PhoneNumber, code: &str) -> Result<(), CodeSendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CodeSendError {
    #[error("code delivery failed: {0}")]
    Transport(String),
}
