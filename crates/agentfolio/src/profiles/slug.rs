use std::sync::Arc;

use serde::Serialize;

use super::guard::ProfilePolicy;
use super::repository::{ProfileRepository, ProfileStoreError};

/// Result of a slug availability probe. `suggestion` is only present when
/// the candidate is taken and a free alternative was found; on the wire it
/// travels under the `slug` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugAvailability {
    pub available: bool,
    #[serde(rename = "slug", skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SlugError {
    #[error("invalid slug: {reason}")]
    InvalidInput { reason: &'static str },
    #[error("slug directory unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<ProfileStoreError> for SlugError {
    fn from(error: ProfileStoreError) -> Self {
        SlugError::StorageUnavailable(error.to_string())
    }
}

/// Uniqueness probe plus deterministic `-1`, `-2`, ... suggestion search.
///
/// The probe never claims availability for a taken slug; the write-time
/// uniqueness constraint in the repository remains the final arbiter for
/// two users racing over the same candidate.
pub struct SlugAllocator<R> {
    repository: Arc<R>,
    policy: ProfilePolicy,
}

impl<R> SlugAllocator<R>
where
    R: ProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>, policy: ProfilePolicy) -> Self {
        Self { repository, policy }
    }

    pub fn check(&self, candidate: &str) -> Result<SlugAvailability, SlugError> {
        let candidate = candidate.trim();
        validate_format(candidate, self.policy.slug_min_len)?;

        if !self.repository.slug_exists(candidate)? {
            return Ok(SlugAvailability {
                available: true,
                suggestion: None,
            });
        }

        let suggestion = self.first_free_suffix(candidate)?;
        Ok(SlugAvailability {
            available: false,
            suggestion: Some(suggestion),
        })
    }

    fn first_free_suffix(&self, base: &str) -> Result<String, SlugError> {
        for attempt in 1..=self.policy.suggestion_attempt_cap {
            let candidate = format!("{base}-{attempt}");
            if !self.repository.slug_exists(&candidate)? {
                return Ok(candidate);
            }
        }

        // A collision run this deep means the directory is effectively
        // unanswerable for this base; refuse rather than guess.
        Err(SlugError::StorageUnavailable(format!(
            "no free suffix for '{base}' within {} attempts",
            self.policy.suggestion_attempt_cap
        )))
    }
}

/// Format gate shared by the allocator and the commit guard.
pub fn validate_format(candidate: &str, min_len: usize) -> Result<(), SlugError> {
    if candidate.len() < min_len {
        return Err(SlugError::InvalidInput {
            reason: "too short",
        });
    }
    if !candidate
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(SlugError::InvalidInput {
            reason: "only lowercase letters, digits, and hyphens allowed",
        });
    }
    if candidate.starts_with('-') || candidate.ends_with('-') {
        return Err(SlugError::InvalidInput {
            reason: "must not start or end with a hyphen",
        });
    }
    if candidate.contains("--") {
        return Err(SlugError::InvalidInput {
            reason: "must not contain consecutive hyphens",
        });
    }
    Ok(())
}

/// Turns a display name into a slug candidate ("Jane Doe" -> "jane-doe").
pub fn slugify(name: &str) -> String {
    let mut slug = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>();
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    let trimmed = slug.trim_matches('-').to_string();
    if trimmed.is_empty() {
        "agent".to_string()
    } else {
        trimmed
    }
}
