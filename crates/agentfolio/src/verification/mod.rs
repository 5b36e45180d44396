//! Phone verification for onboarding: WhatsApp one-time codes with a
//! resend cooldown and single-use consumption.

pub mod domain;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{PhoneNumber, PhoneNumberError, VerificationState};
pub use router::verification_router;
pub use service::{CodeDispatch, VerificationError, VerificationService};
pub use store::{Challenge, ChallengeStore, ChallengeStoreError, CodeSendError, CodeSender};
