use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::config::VerificationConfig;

use super::domain::{PhoneNumber, PhoneNumberError};
use super::store::{Challenge, ChallengeStore, ChallengeStoreError, CodeSendError, CodeSender};

pub const CODE_LENGTH: usize = 6;

/// Service composing the challenge store and the delivery transport.
pub struct VerificationService<S, C> {
    store: Arc<S>,
    sender: Arc<C>,
    resend_cooldown: Duration,
    code_ttl: Duration,
}

/// Receipt for a dispatched code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDispatch {
    pub phone: PhoneNumber,
    pub expires_at: DateTime<Utc>,
}

impl<S, C> VerificationService<S, C>
where
    S: ChallengeStore + 'static,
    C: CodeSender + 'static,
{
    pub fn new(store: Arc<S>, sender: Arc<C>, config: VerificationConfig) -> Self {
        let resend_cooldown =
            Duration::from_std(config.resend_cooldown).unwrap_or_else(|_| Duration::seconds(45));
        let code_ttl =
            Duration::from_std(config.code_ttl).unwrap_or_else(|_| Duration::seconds(300));

        Self {
            store,
            sender,
            resend_cooldown,
            code_ttl,
        }
    }

    /// Creates (or replaces) the challenge for `phone` and hands the code to
    /// the transport. A resend inside the cooldown window is refused with
    /// the seconds left to wait.
    pub fn send_code(
        &self,
        raw_phone: &str,
        now: DateTime<Utc>,
    ) -> Result<CodeDispatch, VerificationError> {
        let phone = PhoneNumber::parse(raw_phone)?;

        if let Some(existing) = self.store.active(&phone)? {
            if !existing.is_expired(now) {
                let resend_at = existing.created_at + self.resend_cooldown;
                if now < resend_at {
                    let seconds_remaining = (resend_at - now).num_seconds().max(1) as u64;
                    return Err(VerificationError::ResendCooldown { seconds_remaining });
                }
            }
        }

        let code = generate_code();
        let challenge = Challenge {
            phone: phone.clone(),
            code: code.clone(),
            created_at: now,
            expires_at: now + self.code_ttl,
        };
        let expires_at = challenge.expires_at;

        self.store.put(challenge)?;
        self.sender.deliver(&phone, &code)?;

        Ok(CodeDispatch { phone, expires_at })
    }

    /// Consumes the matching unexpired challenge. Exactly one caller can
    /// succeed per code; a wrong code leaves the challenge intact so the
    /// user may retry with the right one.
    pub fn verify_code(
        &self,
        raw_phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<PhoneNumber, VerificationError> {
        let phone = PhoneNumber::parse(raw_phone)?;
        let code = code.trim();

        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(VerificationError::InvalidOrExpiredCode);
        }

        if self.store.consume(&phone, code, now)? {
            Ok(phone)
        } else {
            Err(VerificationError::InvalidOrExpiredCode)
        }
    }
}

fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    format!("{:06}", rng.gen_range(0..1_000_000))
}

/// Error raised by the verification service.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error(transparent)]
    Phone(#[from] PhoneNumberError),
    #[error("resend available in {seconds_remaining}s")]
    ResendCooldown { seconds_remaining: u64 },
    #[error("invalid or expired code")]
    InvalidOrExpiredCode,
    #[error(transparent)]
    Store(#[from] ChallengeStoreError),
    #[error(transparent)]
    Send(#[from] CodeSendError),
}

impl VerificationError {
    /// Whether the failure belongs in the `{ok: false, error}` envelope
    /// rather than a 5xx response.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            VerificationError::Phone(_)
                | VerificationError::ResendCooldown { .. }
                | VerificationError::InvalidOrExpiredCode
        )
    }
}
