use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::templates::TemplateId;
use crate::verification::PhoneNumber;

use super::domain::{AgentProfile, ProfileSubmission, SubscriptionState};
use super::slug::{self, SlugError};

const DEFAULT_SLUG_MIN_LEN: usize = 3;
const DEFAULT_BIO_MAX_LEN: usize = 500;
const DEFAULT_SUGGESTION_ATTEMPT_CAP: u32 = 50;
const MAX_EXPERIENCE_YEARS: i32 = 80;

/// Field-level rules the guard and the slug allocator share.
#[derive(Debug, Clone)]
pub struct ProfilePolicy {
    pub slug_min_len: usize,
    pub bio_max_len: usize,
    pub suggestion_attempt_cap: u32,
}

impl Default for ProfilePolicy {
    fn default() -> Self {
        Self {
            slug_min_len: DEFAULT_SLUG_MIN_LEN,
            bio_max_len: DEFAULT_BIO_MAX_LEN,
            suggestion_attempt_cap: DEFAULT_SUGGESTION_ATTEMPT_CAP,
        }
    }
}

/// Validation errors raised when a terminal commit arrives malformed. Each
/// maps to an inline message at the offending field.
#[derive(Debug, thiserror::Error)]
pub enum ProfileViolation {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("phone must be a valid Indian mobile number")]
    InvalidPhone,
    #[error("date of birth must be YYYY-MM-DD")]
    InvalidDateOfBirth,
    #[error("experience must be between 0 and {max} years")]
    ExperienceOutOfRange { max: i32 },
    #[error("bio exceeds {max} characters (found {found})")]
    BioTooLong { max: usize, found: usize },
    #[error("profile photo URL does not look like an image")]
    PhotoNotImage,
    #[error("{0}")]
    Slug(String),
    #[error("template '{0}' is not a known identifier")]
    UnknownTemplate(String),
}

/// Guard responsible for producing clean `AgentProfile` records from raw
/// onboarding submissions.
#[derive(Debug, Clone, Default)]
pub struct ProfileGuard {
    policy: ProfilePolicy,
}

impl ProfileGuard {
    pub fn with_policy(policy: ProfilePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ProfilePolicy {
        &self.policy
    }

    /// Convert an inbound submission into a sanitized agent profile. New
    /// profiles start on the free tier, published, with empty content
    /// collections; subscription upgrades happen elsewhere.
    pub fn profile_from_submission(
        &self,
        submission: ProfileSubmission,
    ) -> Result<AgentProfile, ProfileViolation> {
        let name = required(&submission.name, "name")?;
        let city = required(&submission.city, "city")?;
        let area = required(&submission.area, "area")?;

        let email = required(&submission.email, "email")?;
        if !is_valid_email(&email) {
            return Err(ProfileViolation::InvalidEmail);
        }

        let phone = PhoneNumber::parse(&submission.phone)
            .map_err(|_| ProfileViolation::InvalidPhone)?
            .into_e164();

        let date_of_birth = NaiveDate::parse_from_str(submission.date_of_birth.trim(), "%Y-%m-%d")
            .map_err(|_| ProfileViolation::InvalidDateOfBirth)?;

        if !(0..=MAX_EXPERIENCE_YEARS).contains(&submission.experience_years) {
            return Err(ProfileViolation::ExperienceOutOfRange {
                max: MAX_EXPERIENCE_YEARS,
            });
        }

        let bio = submission.bio.trim().to_string();
        if bio.chars().count() > self.policy.bio_max_len {
            return Err(ProfileViolation::BioTooLong {
                max: self.policy.bio_max_len,
                found: bio.chars().count(),
            });
        }

        let profile_photo_url = match submission.profile_photo_url {
            Some(url) if !url.trim().is_empty() => {
                let url = url.trim().to_string();
                if !looks_like_image(&url) {
                    return Err(ProfileViolation::PhotoNotImage);
                }
                Some(url)
            }
            _ => None,
        };

        let slug_candidate = submission.slug.trim().to_string();
        slug::validate_format(&slug_candidate, self.policy.slug_min_len).map_err(
            |error| match error {
                SlugError::InvalidInput { reason } => {
                    ProfileViolation::Slug(format!("slug {reason}"))
                }
                SlugError::StorageUnavailable(detail) => ProfileViolation::Slug(detail),
            },
        )?;

        let template = TemplateId::parse(&submission.template)
            .map_err(|err| ProfileViolation::UnknownTemplate(err.0))?;

        Ok(AgentProfile {
            slug: slug_candidate,
            name,
            email,
            city,
            area,
            phone,
            bio,
            profile_photo_url,
            date_of_birth,
            experience_years: submission.experience_years as u8,
            template: template.key().to_string(),
            subscription: SubscriptionState::free_tier(),
            is_published: true,
            listings: Vec::new(),
            testimonials: Vec::new(),
            faqs: Vec::new(),
            awards: Vec::new(),
            gallery: Vec::new(),
            builder_logos: Vec::new(),
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ProfileViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProfileViolation::MissingField { field });
    }
    Ok(trimmed.to_string())
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email regex compiles")
    });
    regex.is_match(email)
}

/// The upload pipeline is an external collaborator; here we only require
/// that the stored URL's extension guesses to an `image/*` MIME type.
pub fn looks_like_image(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    mime_guess::from_path(path)
        .first()
        .map(|guessed| guessed.type_() == mime::IMAGE)
        .unwrap_or(false)
}
