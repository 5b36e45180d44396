use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profiles::domain::{BillingInterval, ContentId, SubscriptionPlan};

/// Identifier wrapper for queued moderation items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

/// The kinds of agent-submitted content the admin console reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Award,
    GalleryImage,
    BuilderLogo,
    Testimonial,
    Faq,
    Property,
    Profile,
}

impl ContentKind {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Award,
            Self::GalleryImage,
            Self::BuilderLogo,
            Self::Testimonial,
            Self::Faq,
            Self::Property,
            Self::Profile,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Award => "Award",
            Self::GalleryImage => "Gallery Image",
            Self::BuilderLogo => "Builder Logo",
            Self::Testimonial => "Testimonial",
            Self::Faq => "FAQ",
            Self::Property => "Property",
            Self::Profile => "Profile",
        }
    }
}

/// One queued record of submitted content awaiting review. Append-only:
/// moderation acts on the underlying entity and removes the item from the
/// pending view, never mutating the item itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationItem {
    pub id: ItemId,
    pub agent_slug: String,
    pub kind: ContentKind,
    /// Absent for profile-level items; the slug identifies the target.
    pub content_id: Option<ContentId>,
    pub excerpt: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approved,
    Removed,
}

impl ReviewAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Removed => "removed",
        }
    }
}

/// Durable trace of a review decision; the only persisted record an
/// approval leaves behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub item_id: ItemId,
    pub agent_slug: String,
    pub kind: ContentKind,
    pub action: ReviewAction,
    pub reason: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}

/// Durable trace of an admin subscription override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionOverrideRecord {
    pub agent_slug: String,
    pub plan: SubscriptionPlan,
    pub interval: BillingInterval,
    pub ends_at: DateTime<Utc>,
    pub is_subscribed: bool,
    pub reason: Option<String>,
    pub recorded_at: DateTime<Utc>,
}
