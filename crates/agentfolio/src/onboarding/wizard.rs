use chrono::NaiveDate;

use crate::profiles::guard::{is_valid_email, looks_like_image, ProfilePolicy};
use crate::profiles::repository::CommitReceipt;
use crate::profiles::slug::{SlugAvailability, SlugError};
use crate::profiles::ProfileSubmission;
use crate::verification::{PhoneNumber, VerificationState};

use super::autosave::DraftSaver;
use super::domain::{StepValidationError, WizardDraft, WizardStep};

/// Remote slug availability probe (backed by the slug allocator or its
/// HTTP endpoint, depending on where the wizard runs).
pub trait SlugDirectory: Send + Sync {
    fn check(&self, candidate: &str) -> Result<SlugAvailability, SlugError>;
}

/// Terminal commit seam. One atomic profile-update with the full draft.
pub trait ProfileCommitter: Send + Sync {
    fn commit(&self, submission: ProfileSubmission) -> Result<CommitReceipt, CommitFailure>;
}

/// Commit failures keep the user on the last step with the draft intact;
/// the two variants surface distinctly (inline reason vs. retry-later).
#[derive(Debug, thiserror::Error)]
pub enum CommitFailure {
    #[error("{0}")]
    Rejected(String),
    #[error("could not save your profile, please retry: {0}")]
    Unavailable(String),
}

/// Outcome of a successful `next()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    Advanced { step: WizardStep },
    Committed { slug: String },
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Step(#[from] StepValidationError),
    #[error(transparent)]
    SlugCheck(#[from] SlugError),
    #[error(transparent)]
    Commit(#[from] CommitFailure),
}

/// The onboarding wizard state machine. Owns its draft outright (no
/// ambient store); collaborators are injected at construction.
///
/// Every field mutation hands the full draft to the saver, which debounces
/// the actual write; a reload resumes from whatever was last flushed.
pub struct OnboardingWizard {
    draft: WizardDraft,
    policy: ProfilePolicy,
    slugs: Box<dyn SlugDirectory>,
    committer: Box<dyn ProfileCommitter>,
    saver: Box<dyn DraftSaver>,
}

impl OnboardingWizard {
    pub fn new(
        policy: ProfilePolicy,
        slugs: Box<dyn SlugDirectory>,
        committer: Box<dyn ProfileCommitter>,
        saver: Box<dyn DraftSaver>,
    ) -> Self {
        Self {
            draft: WizardDraft::default(),
            policy,
            slugs,
            committer,
            saver,
        }
    }

    /// Rehydrate from a persisted draft, resuming at the saved step.
    pub fn resume(
        draft: WizardDraft,
        policy: ProfilePolicy,
        slugs: Box<dyn SlugDirectory>,
        committer: Box<dyn ProfileCommitter>,
        saver: Box<dyn DraftSaver>,
    ) -> Self {
        Self {
            draft,
            policy,
            slugs,
            committer,
            saver,
        }
    }

    pub fn draft(&self) -> &WizardDraft {
        &self.draft
    }

    pub fn current_step(&self) -> WizardStep {
        self.draft.current_step
    }

    // Field mutators. Each queues an autosave; none of them validate, that
    // happens at the step gate in `next()`.

    pub fn set_name(&mut self, name: &str) {
        self.draft.name = name.to_string();
        self.touch();
    }

    pub fn set_email(&mut self, email: &str) {
        self.draft.email = email.to_string();
        self.touch();
    }

    pub fn set_city(&mut self, city: &str) {
        self.draft.city = city.to_string();
        self.touch();
    }

    pub fn set_area(&mut self, area: &str) {
        self.draft.area = area.to_string();
        self.touch();
    }

    /// Changing the number is the only edit that invalidates an earlier
    /// verification; setting the same value keeps the state.
    pub fn set_phone(&mut self, phone: &str) {
        if self.draft.phone != phone {
            self.draft.phone = phone.to_string();
            self.draft.phone_verification = VerificationState::Unsent;
            self.touch();
        }
    }

    pub fn mark_code_sent(&mut self) {
        self.draft.phone_verification = VerificationState::Sent;
        self.touch();
    }

    pub fn mark_phone_verified(&mut self) {
        self.draft.phone_verification = VerificationState::Verified;
        self.touch();
    }

    pub fn set_date_of_birth(&mut self, date: &str) {
        self.draft.date_of_birth = date.to_string();
        self.touch();
    }

    pub fn set_experience_years(&mut self, years: i32) {
        self.draft.experience_years = Some(years);
        self.touch();
    }

    pub fn set_slug(&mut self, slug: &str) {
        self.draft.slug = slug.trim().to_string();
        self.touch();
    }

    pub fn set_bio(&mut self, bio: &str) {
        self.draft.bio = bio.to_string();
        self.touch();
    }

    pub fn set_photo_url(&mut self, url: Option<&str>) {
        self.draft.profile_photo_url = url.map(str::to_string);
        self.touch();
    }

    pub fn set_template(&mut self, template: crate::templates::TemplateId) {
        self.draft.template = Some(template);
        self.touch();
    }

    /// Equality-guarded prefill for session-provided identity that becomes
    /// available mid-flow. A value is applied once per differing session
    /// value and never clobbers a field the user has edited since.
    pub fn apply_session_identity(&mut self, name: Option<&str>, email: Option<&str>) {
        let mut changed = false;

        if let Some(name) = name {
            if self.draft.prefilled_name.as_deref() != Some(name) {
                let untouched = self.draft.name.is_empty()
                    || Some(self.draft.name.as_str()) == self.draft.prefilled_name.as_deref();
                if untouched {
                    self.draft.name = name.to_string();
                    changed = true;
                }
                self.draft.prefilled_name = Some(name.to_string());
            }
        }

        if let Some(email) = email {
            if self.draft.prefilled_email.as_deref() != Some(email) {
                let untouched = self.draft.email.is_empty()
                    || Some(self.draft.email.as_str()) == self.draft.prefilled_email.as_deref();
                if untouched {
                    self.draft.email = email.to_string();
                    changed = true;
                }
                self.draft.prefilled_email = Some(email.to_string());
            }
        }

        if changed {
            self.touch();
        }
    }

    /// Validate the current step and advance; on the last step, perform
    /// the terminal commit instead. A blocked step leaves the index alone.
    pub fn next(&mut self) -> Result<NextOutcome, WizardError> {
        let step = self.draft.current_step;

        if step == WizardStep::Slug {
            self.validate_slug_step()?;
        } else {
            self.validate_local(step)?;
        }

        if step.is_last() {
            return self.commit();
        }

        let next = step.next().unwrap_or(step);
        self.draft.current_step = next;
        self.touch();
        Ok(NextOutcome::Advanced { step: next })
    }

    /// Unconditional saturating step back; already-entered data was valid
    /// when the user advanced past it, so no re-validation.
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.draft.current_step.previous() {
            self.draft.current_step = previous;
            self.touch();
        }
        self.draft.current_step
    }

    /// Explicit abandon: discards the draft and clears the persisted copy.
    pub fn reset(&mut self) {
        self.draft = WizardDraft::default();
        self.saver.clear();
    }

    fn commit(&mut self) -> Result<NextOutcome, WizardError> {
        let submission = self.submission();
        let receipt = self.committer.commit(submission)?;
        self.saver.clear();
        Ok(NextOutcome::Committed { slug: receipt.slug })
    }

    /// The full draft as the commit operation expects it.
    pub fn submission(&self) -> ProfileSubmission {
        ProfileSubmission {
            name: self.draft.name.clone(),
            email: self.draft.email.clone(),
            city: self.draft.city.clone(),
            area: self.draft.area.clone(),
            phone: self.draft.phone.clone(),
            date_of_birth: self.draft.date_of_birth.clone(),
            experience_years: self.draft.experience_years.unwrap_or(0),
            slug: self.draft.slug.clone(),
            bio: self.draft.bio.clone(),
            profile_photo_url: self.draft.profile_photo_url.clone(),
            template: self
                .draft
                .template
                .map(|template| template.key().to_string())
                .unwrap_or_default(),
        }
    }

    fn validate_local(&self, step: WizardStep) -> Result<(), StepValidationError> {
        match step {
            WizardStep::Welcome => Ok(()),
            WizardStep::Name => require(&self.draft.name, "name"),
            WizardStep::Email => {
                require(&self.draft.email, "email")?;
                if !is_valid_email(self.draft.email.trim()) {
                    return Err(StepValidationError::InvalidEmail);
                }
                Ok(())
            }
            WizardStep::City => require(&self.draft.city, "city"),
            WizardStep::Area => require(&self.draft.area, "area"),
            WizardStep::PhoneVerify => {
                require(&self.draft.phone, "phone")?;
                if PhoneNumber::parse(&self.draft.phone).is_err() {
                    return Err(StepValidationError::InvalidPhone);
                }
                // Format-valid but unverified numbers still block.
                if !self.draft.phone_verification.is_verified() {
                    return Err(StepValidationError::PhoneUnverified);
                }
                Ok(())
            }
            WizardStep::DateOfBirth => {
                require(&self.draft.date_of_birth, "date of birth")?;
                NaiveDate::parse_from_str(self.draft.date_of_birth.trim(), "%Y-%m-%d")
                    .map_err(|_| StepValidationError::InvalidDateOfBirth)?;
                Ok(())
            }
            WizardStep::Experience => match self.draft.experience_years {
                Some(years) if years >= 0 => Ok(()),
                Some(_) => Err(StepValidationError::NegativeExperience),
                None => Err(StepValidationError::MissingField {
                    field: "experience",
                }),
            },
            WizardStep::Slug => Ok(()),
            WizardStep::Bio => {
                let length = self.draft.bio.chars().count();
                if length > self.policy.bio_max_len {
                    return Err(StepValidationError::BioTooLong {
                        max: self.policy.bio_max_len,
                        found: length,
                    });
                }
                Ok(())
            }
            WizardStep::Photo => match self.draft.profile_photo_url.as_deref() {
                Some(url) if !url.trim().is_empty() && !looks_like_image(url) => {
                    Err(StepValidationError::PhotoNotImage)
                }
                _ => Ok(()),
            },
            WizardStep::Template => {
                if self.draft.template.is_none() {
                    return Err(StepValidationError::TemplateNotChosen);
                }
                Ok(())
            }
        }
    }

    /// The slug step is the one validator that leaves the process: it asks
    /// the directory, and when the candidate is taken it accepts the
    /// server's suggestion into the draft while still blocking this
    /// attempt, so the user sees the substitution before re-trying.
    fn validate_slug_step(&mut self) -> Result<(), WizardError> {
        if self.draft.slug.is_empty() {
            return Err(StepValidationError::MissingField { field: "slug" }.into());
        }

        let availability = self
            .slugs
            .check(&self.draft.slug)
            .map_err(|error| match error {
                SlugError::InvalidInput { reason } => WizardError::Step(
                    StepValidationError::SlugInvalid {
                        reason: reason.to_string(),
                    },
                ),
                other => WizardError::SlugCheck(other),
            })?;

        if availability.available {
            return Ok(());
        }

        if let Some(suggestion) = &availability.suggestion {
            self.draft.slug = suggestion.clone();
            self.touch();
        }
        Err(StepValidationError::SlugTaken {
            accepted_suggestion: availability.suggestion,
        }
        .into())
    }

    fn touch(&self) {
        self.saver.queue(&self.draft);
    }
}

fn require(value: &str, field: &'static str) -> Result<(), StepValidationError> {
    if value.trim().is_empty() {
        return Err(StepValidationError::MissingField { field });
    }
    Ok(())
}
