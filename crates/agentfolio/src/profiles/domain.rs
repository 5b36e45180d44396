use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for agent-owned content items (listings, awards,
/// gallery images, and so on) so moderation can address them uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(pub String);

/// One agent's published presence. The slug is globally unique and only
/// re-allocated through the same uniqueness check that assigned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub slug: String,
    pub name: String,
    pub email: String,
    pub city: String,
    pub area: String,
    /// Verified WhatsApp number in E.164 form.
    pub phone: String,
    pub bio: String,
    pub profile_photo_url: Option<String>,
    pub date_of_birth: NaiveDate,
    pub experience_years: u8,
    /// Stored template identifier. Kept as the raw string because records
    /// may predate the current template set; rendering resolves it
    /// leniently with a fallback to the default variant.
    pub template: String,
    pub subscription: SubscriptionState,
    pub is_published: bool,
    pub listings: Vec<PropertyListing>,
    pub testimonials: Vec<Testimonial>,
    pub faqs: Vec<FaqEntry>,
    pub awards: Vec<Award>,
    pub gallery: Vec<GalleryImage>,
    pub builder_logos: Vec<BuilderLogo>,
}

/// Paid-plan state on the agent record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionState {
    pub plan: SubscriptionPlan,
    pub interval: BillingInterval,
    pub ends_at: DateTime<Utc>,
    pub is_subscribed: bool,
}

impl SubscriptionState {
    /// Expiry is time-dependent, so activity is always computed against a
    /// caller-supplied `now` rather than cached.
    pub fn active(&self, now: DateTime<Utc>) -> bool {
        self.is_subscribed && self.ends_at > now
    }

    pub fn free_tier() -> Self {
        Self {
            plan: SubscriptionPlan::Free,
            interval: BillingInterval::Monthly,
            ends_at: DateTime::<Utc>::MAX_UTC,
            is_subscribed: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Free,
    Pro,
    Elite,
}

impl SubscriptionPlan {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Pro => "Pro",
            Self::Elite => "Elite",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    Monthly,
    Yearly,
}

impl BillingInterval {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

/// A property the agent is marketing on their page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyListing {
    pub id: ContentId,
    pub title: String,
    pub locality: String,
    pub price_inr: u64,
    pub bedrooms: Option<u8>,
    pub status: ListingStatus,
    pub photo_urls: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Sold,
    Delisted,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Sold => "Sold",
            Self::Delisted => "Delisted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: ContentId,
    pub author: String,
    pub quote: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: ContentId,
    pub question: String,
    pub answer: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub id: ContentId,
    pub title: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: ContentId,
    pub url: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderLogo {
    pub id: ContentId,
    pub builder_name: String,
    pub url: String,
    pub visible: bool,
}

/// Inbound enquiry captured from the public page's contact section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub phone: String,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

/// The complete onboarding draft as the terminal commit submits it. Raw
/// strings throughout; the guard turns this into a clean `AgentProfile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    pub name: String,
    pub email: String,
    pub city: String,
    pub area: String,
    pub phone: String,
    pub date_of_birth: String,
    pub experience_years: i32,
    pub slug: String,
    pub bio: String,
    pub profile_photo_url: Option<String>,
    pub template: String,
}
