use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::onboarding::autosave::DraftSaver;
use crate::onboarding::domain::WizardDraft;
use crate::onboarding::wizard::{
    CommitFailure, OnboardingWizard, ProfileCommitter, SlugDirectory,
};
use crate::profiles::guard::ProfilePolicy;
use crate::profiles::repository::CommitReceipt;
use crate::profiles::slug::{SlugAvailability, SlugError};
use crate::profiles::ProfileSubmission;
use crate::templates::TemplateId;

/// Slug directory over a fixed taken-set, suggesting `-N` suffixes the way
/// the real allocator does.
pub(super) struct FixedDirectory {
    taken: HashSet<String>,
}

impl FixedDirectory {
    pub(super) fn with_taken(taken: &[&str]) -> Self {
        Self {
            taken: taken.iter().map(|slug| slug.to_string()).collect(),
        }
    }
}

impl SlugDirectory for FixedDirectory {
    fn check(&self, candidate: &str) -> Result<SlugAvailability, SlugError> {
        if candidate.len() < 3 {
            return Err(SlugError::InvalidInput { reason: "too short" });
        }
        if !self.taken.contains(candidate) {
            return Ok(SlugAvailability {
                available: true,
                suggestion: None,
            });
        }
        let suggestion = (1..=50)
            .map(|attempt| format!("{candidate}-{attempt}"))
            .find(|alternative| !self.taken.contains(alternative));
        Ok(SlugAvailability {
            available: false,
            suggestion,
        })
    }
}

pub(super) struct OfflineDirectory;

impl SlugDirectory for OfflineDirectory {
    fn check(&self, _candidate: &str) -> Result<SlugAvailability, SlugError> {
        Err(SlugError::StorageUnavailable("directory offline".to_string()))
    }
}

/// Synchronous saver that records every queued draft, standing in for the
/// debounced worker in unit tests.
#[derive(Default, Clone)]
pub(super) struct RecordingSaver {
    pub(super) queued: Arc<Mutex<Vec<WizardDraft>>>,
    pub(super) cleared: Arc<Mutex<usize>>,
}

impl DraftSaver for RecordingSaver {
    fn queue(&self, draft: &WizardDraft) {
        self.queued
            .lock()
            .expect("saver mutex poisoned")
            .push(draft.clone());
    }

    fn clear(&self) {
        *self.cleared.lock().expect("saver mutex poisoned") += 1;
    }
}

impl RecordingSaver {
    pub(super) fn last(&self) -> Option<WizardDraft> {
        self.queued.lock().expect("saver mutex poisoned").last().cloned()
    }

    pub(super) fn clear_count(&self) -> usize {
        *self.cleared.lock().expect("saver mutex poisoned")
    }
}

/// Committer that records submissions and answers with the slug.
#[derive(Default, Clone)]
pub(super) struct RecordingCommitter {
    pub(super) committed: Arc<Mutex<Vec<ProfileSubmission>>>,
}

impl ProfileCommitter for RecordingCommitter {
    fn commit(&self, submission: ProfileSubmission) -> Result<CommitReceipt, CommitFailure> {
        let slug = submission.slug.clone();
        self.committed
            .lock()
            .expect("committer mutex poisoned")
            .push(submission);
        Ok(CommitReceipt { slug })
    }
}

pub(super) struct RejectingCommitter;

impl ProfileCommitter for RejectingCommitter {
    fn commit(&self, _submission: ProfileSubmission) -> Result<CommitReceipt, CommitFailure> {
        Err(CommitFailure::Rejected("bio exceeds 500 characters".to_string()))
    }
}

pub(super) struct OfflineCommitter;

impl ProfileCommitter for OfflineCommitter {
    fn commit(&self, _submission: ProfileSubmission) -> Result<CommitReceipt, CommitFailure> {
        Err(CommitFailure::Unavailable("database offline".to_string()))
    }
}

pub(super) fn wizard_with(
    directory: impl SlugDirectory + 'static,
    committer: impl ProfileCommitter + 'static,
    saver: RecordingSaver,
) -> OnboardingWizard {
    OnboardingWizard::new(
        ProfilePolicy::default(),
        Box::new(directory),
        Box::new(committer),
        Box::new(saver),
    )
}

pub(super) fn wizard() -> (OnboardingWizard, RecordingSaver, RecordingCommitter) {
    let saver = RecordingSaver::default();
    let committer = RecordingCommitter::default();
    let wizard = wizard_with(
        FixedDirectory::with_taken(&[]),
        committer.clone(),
        saver.clone(),
    );
    (wizard, saver, committer)
}

/// Fills every field with the canonical Hyderabad fixture used across the
/// suite, leaving the wizard at the welcome step.
pub(super) fn fill_valid_draft(wizard: &mut OnboardingWizard) {
    wizard.set_name("Jane Doe");
    wizard.set_email("jane@example.com");
    wizard.set_city("Hyderabad");
    wizard.set_area("Madhapur");
    wizard.set_phone("+919876543210");
    wizard.mark_code_sent();
    wizard.mark_phone_verified();
    wizard.set_date_of_birth("1988-04-02");
    wizard.set_experience_years(10);
    wizard.set_slug("jane-doe");
    wizard.set_bio("Helping families find homes in Madhapur.");
    wizard.set_photo_url(Some("https://cdn.example.com/jane.jpg"));
    wizard.set_template(TemplateId::Skyline);
}
