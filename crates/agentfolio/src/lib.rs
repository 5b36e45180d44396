pub mod config;
pub mod error;
pub mod listings;
pub mod moderation;
pub mod onboarding;
pub mod profiles;
pub mod telemetry;
pub mod templates;
pub mod verification;
