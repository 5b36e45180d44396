use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::templates::{self, TemplateId};

use super::capacity::{self, CapacityReport, PlanPolicy};
use super::domain::{AgentProfile, Lead, ProfileSubmission};
use super::guard::{ProfileGuard, ProfilePolicy, ProfileViolation};
use super::publication::{resolve_view, ProfileView, ViewerContext};
use super::repository::{
    CommitReceipt, LeadSink, LeadSinkError, ProfileRepository, ProfileStoreError,
};
use super::slug::{SlugAllocator, SlugAvailability, SlugError};

/// Service composing the commit guard, slug allocator, publication gate,
/// and template dispatch behind the profile endpoints.
pub struct ProfileService<R, L> {
    guard: Arc<ProfileGuard>,
    allocator: SlugAllocator<R>,
    repository: Arc<R>,
    leads: Arc<L>,
    plan_policy: PlanPolicy,
}

/// Answer for a public page request; the HTTP layer serves `html` with 200
/// in every variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPage {
    pub slug: String,
    pub kind: PublicPageKind,
    pub html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicPageKind {
    Live,
    OwnerPreview,
    Placeholder,
}

impl<R, L> ProfileService<R, L>
where
    R: ProfileRepository + 'static,
    L: LeadSink + 'static,
{
    pub fn new(
        repository: Arc<R>,
        leads: Arc<L>,
        policy: ProfilePolicy,
        plan_policy: PlanPolicy,
    ) -> Self {
        let guard = Arc::new(ProfileGuard::with_policy(policy.clone()));
        let allocator = SlugAllocator::new(repository.clone(), policy);

        Self {
            guard,
            allocator,
            repository,
            leads,
            plan_policy,
        }
    }

    /// Probe slug availability for the wizard's slug step.
    pub fn check_slug(&self, candidate: &str) -> Result<SlugAvailability, SlugError> {
        self.allocator.check(candidate)
    }

    /// Terminal commit: validates the full draft and inserts the profile
    /// atomically. A slug race lost at insert time comes back as a
    /// conflict carrying a fresh suggestion, never a silent overwrite.
    pub fn commit(
        &self,
        submission: ProfileSubmission,
    ) -> Result<CommitReceipt, ProfileServiceError> {
        let profile = self.guard.profile_from_submission(submission)?;
        let slug = profile.slug.clone();

        match self.repository.insert(profile) {
            Ok(stored) => Ok(CommitReceipt { slug: stored.slug }),
            Err(ProfileStoreError::SlugTaken) => {
                let suggestion = match self.allocator.check(&slug) {
                    Ok(availability) => availability.suggestion,
                    Err(_) => None,
                };
                Err(ProfileServiceError::SlugConflict { suggestion })
            }
            Err(other) => Err(ProfileServiceError::Store(other)),
        }
    }

    /// Resolve a slug to the page a given viewer should see, evaluated at
    /// `now` so subscription expiry takes effect on the next request.
    pub fn public_page(
        &self,
        slug: &str,
        viewer: ViewerContext,
        now: DateTime<Utc>,
    ) -> Result<PublicPage, ProfileServiceError> {
        let agent = self.fetch(slug)?;

        let (kind, html) = match resolve_view(&agent, viewer, now) {
            ProfileView::Live => (PublicPageKind::Live, render_profile(&agent).html),
            ProfileView::OwnerPreview { .. } => {
                let page = render_profile(&agent);
                let html = format!("{}{}", templates::owner_preview_banner(slug), page.html);
                (PublicPageKind::OwnerPreview, html)
            }
            ProfileView::Placeholder => (
                PublicPageKind::Placeholder,
                templates::render_placeholder(slug),
            ),
        };

        Ok(PublicPage {
            slug: agent.slug,
            kind,
            html,
        })
    }

    /// Append a lead to the agent's inbox. Gated profiles do not accept
    /// leads; the contact form is not publicly reachable on them.
    pub fn submit_lead(
        &self,
        slug: &str,
        lead: Lead,
        now: DateTime<Utc>,
    ) -> Result<(), ProfileServiceError> {
        let agent = self.fetch(slug)?;

        if !super::publication::is_publicly_visible(&agent, now) {
            return Err(ProfileServiceError::ProfileGated);
        }
        if lead.name.trim().is_empty() {
            return Err(ProfileServiceError::Validation(
                ProfileViolation::MissingField { field: "name" },
            ));
        }
        if lead.message.trim().is_empty() {
            return Err(ProfileServiceError::Validation(
                ProfileViolation::MissingField { field: "message" },
            ));
        }

        self.leads.append(&agent.slug, lead)?;
        Ok(())
    }

    /// Quota usage for the dashboard surface.
    pub fn capacity(&self, slug: &str) -> Result<CapacityReport, ProfileServiceError> {
        let agent = self.fetch(slug)?;
        Ok(capacity::estimate(&agent, &self.plan_policy))
    }

    pub fn fetch(&self, slug: &str) -> Result<AgentProfile, ProfileServiceError> {
        self.repository
            .fetch(slug)?
            .ok_or(ProfileServiceError::Store(ProfileStoreError::NotFound))
    }
}

/// Renders an agent record with its stored template, falling back to the
/// default variant for identifiers the current set no longer knows.
pub fn render_profile(agent: &AgentProfile) -> templates::RenderedPage {
    let template = TemplateId::resolve_stored(&agent.template);
    templates::render(template, agent)
}

/// Error raised by the profile service.
#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error(transparent)]
    Validation(#[from] ProfileViolation),
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error("slug already in use")]
    SlugConflict { suggestion: Option<String> },
    #[error("profile is not accepting enquiries")]
    ProfileGated,
    #[error(transparent)]
    Store(#[from] ProfileStoreError),
    #[error(transparent)]
    Leads(#[from] LeadSinkError),
}
