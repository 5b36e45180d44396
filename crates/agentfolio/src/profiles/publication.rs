use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::AgentProfile;

/// Who is asking for the page. Owners may force the public rendition to
/// see exactly what visitors see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerContext {
    pub is_owner: bool,
    pub force_public: bool,
}

impl ViewerContext {
    pub const fn public() -> Self {
        Self {
            is_owner: false,
            force_public: false,
        }
    }

    pub const fn owner() -> Self {
        Self {
            is_owner: true,
            force_public: false,
        }
    }
}

/// Why the gate is closed, surfaced on the owner preview banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateReason {
    NotSubscribed,
    SubscriptionExpired,
    Unpublished,
}

impl GateReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotSubscribed => "no active subscription",
            Self::SubscriptionExpired => "subscription expired",
            Self::Unpublished => "profile unpublished",
        }
    }
}

/// How the request should be answered once the gate has been evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileView {
    /// Gate open: dispatch to the template renderer.
    Live,
    /// Gate closed but the owner is looking: render the real page behind
    /// an explicit preview banner.
    OwnerPreview { reasons: Vec<GateReason> },
    /// Gate closed for everyone else: the fixed placeholder page.
    Placeholder,
}

/// `subscription_active AND is_published`, evaluated against the supplied
/// `now` on every call so expiry boundaries are never cached over.
pub fn is_publicly_visible(agent: &AgentProfile, now: DateTime<Utc>) -> bool {
    agent.subscription.active(now) && agent.is_published
}

pub fn gate_reasons(agent: &AgentProfile, now: DateTime<Utc>) -> Vec<GateReason> {
    let mut reasons = Vec::new();
    if !agent.subscription.is_subscribed {
        reasons.push(GateReason::NotSubscribed);
    } else if agent.subscription.ends_at <= now {
        reasons.push(GateReason::SubscriptionExpired);
    }
    if !agent.is_published {
        reasons.push(GateReason::Unpublished);
    }
    reasons
}

pub fn resolve_view(agent: &AgentProfile, viewer: ViewerContext, now: DateTime<Utc>) -> ProfileView {
    if is_publicly_visible(agent, now) {
        return ProfileView::Live;
    }

    if viewer.is_owner && !viewer.force_public {
        return ProfileView::OwnerPreview {
            reasons: gate_reasons(agent, now),
        };
    }

    ProfileView::Placeholder
}
