//! The onboarding wizard: a fixed 12-step sequence with per-step
//! validation gates, debounced draft persistence, and an atomic terminal
//! commit.

pub mod autosave;
pub mod domain;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use autosave::{DebouncedAutosave, DraftSaver, DraftStore, DraftStoreError};
pub use domain::{StepValidationError, WizardDraft, WizardStep};
pub use wizard::{
    CommitFailure, NextOutcome, OnboardingWizard, ProfileCommitter, SlugDirectory, WizardError,
};
