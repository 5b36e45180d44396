use serde::{Deserialize, Serialize};

use crate::templates::TemplateId;
use crate::verification::VerificationState;

/// The fixed, linear onboarding sequence. Step order is part of the
/// product contract; `ordered()` is the single source of truth for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Welcome,
    Name,
    Email,
    City,
    Area,
    PhoneVerify,
    DateOfBirth,
    Experience,
    Slug,
    Bio,
    Photo,
    Template,
}

impl WizardStep {
    pub const COUNT: usize = 12;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Welcome,
            Self::Name,
            Self::Email,
            Self::City,
            Self::Area,
            Self::PhoneVerify,
            Self::DateOfBirth,
            Self::Experience,
            Self::Slug,
            Self::Bio,
            Self::Photo,
            Self::Template,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Name => "Your Name",
            Self::Email => "Email",
            Self::City => "City",
            Self::Area => "Area",
            Self::PhoneVerify => "WhatsApp Number",
            Self::DateOfBirth => "Date of Birth",
            Self::Experience => "Experience",
            Self::Slug => "Profile URL",
            Self::Bio => "About You",
            Self::Photo => "Profile Photo",
            Self::Template => "Choose a Template",
        }
    }

    pub fn index(self) -> usize {
        Self::ordered()
            .iter()
            .position(|step| *step == self)
            .unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ordered().get(index).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub const fn is_last(self) -> bool {
        matches!(self, Self::Template)
    }
}

/// The in-progress onboarding form state. A staging area, not an
/// invariant-bearing entity: it is serialized to the draft store after
/// every mutation and discarded on commit or explicit reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardDraft {
    pub current_step: WizardStep,
    pub name: String,
    pub email: String,
    pub city: String,
    pub area: String,
    pub phone: String,
    pub phone_verification: VerificationState,
    pub date_of_birth: String,
    pub experience_years: Option<i32>,
    pub slug: String,
    pub bio: String,
    pub profile_photo_url: Option<String>,
    pub template: Option<TemplateId>,
    /// Session values already applied, so prefill never clobbers an edit.
    pub prefilled_name: Option<String>,
    pub prefilled_email: Option<String>,
}

impl Default for WizardDraft {
    fn default() -> Self {
        Self {
            current_step: WizardStep::Welcome,
            name: String::new(),
            email: String::new(),
            city: String::new(),
            area: String::new(),
            phone: String::new(),
            phone_verification: VerificationState::Unsent,
            date_of_birth: String::new(),
            experience_years: None,
            slug: String::new(),
            bio: String::new(),
            profile_photo_url: None,
            template: None,
            prefilled_name: None,
            prefilled_email: None,
        }
    }
}

/// Step-level validation failures. Each keeps the user inside the current
/// step with an inline message; none of them lose draft data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("phone must be a valid Indian mobile number")]
    InvalidPhone,
    #[error("verify your WhatsApp number to continue")]
    PhoneUnverified,
    #[error("date of birth must be YYYY-MM-DD")]
    InvalidDateOfBirth,
    #[error("experience must be zero or more years")]
    NegativeExperience,
    #[error("bio exceeds {max} characters (found {found})")]
    BioTooLong { max: usize, found: usize },
    #[error("profile photo URL does not look like an image")]
    PhotoNotImage,
    #[error("slug {reason}")]
    SlugInvalid { reason: String },
    #[error("that URL is taken")]
    SlugTaken { accepted_suggestion: Option<String> },
    #[error("pick a template to finish")]
    TemplateNotChosen,
}
