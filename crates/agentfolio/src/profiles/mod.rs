//! Agent profiles: slug allocation, commit validation, the publication
//! gate, quota estimation, and the public page endpoints.

pub mod capacity;
pub mod domain;
pub mod guard;
pub mod publication;
pub mod repository;
pub mod router;
pub mod service;
pub mod slug;

#[cfg(test)]
mod tests;

pub use capacity::{CapacityLevel, CapacityReport, PlanPolicy};
pub use domain::{
    AgentProfile, Award, BillingInterval, BuilderLogo, ContentId, FaqEntry, GalleryImage, Lead,
    ListingStatus, ProfileSubmission, PropertyListing, SubscriptionPlan, SubscriptionState,
    Testimonial,
};
pub use guard::{ProfileGuard, ProfilePolicy, ProfileViolation};
pub use publication::{is_publicly_visible, resolve_view, GateReason, ProfileView, ViewerContext};
pub use repository::{
    CommitReceipt, LeadSink, LeadSinkError, ProfileRepository, ProfileStoreError,
};
pub use router::{profile_router, AGENT_SLUG_HEADER};
pub use service::{
    render_profile, ProfileService, ProfileServiceError, PublicPage, PublicPageKind,
};
pub use slug::{slugify, SlugAllocator, SlugAvailability, SlugError};
