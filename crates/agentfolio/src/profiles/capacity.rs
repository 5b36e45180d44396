use serde::Serialize;

use super::domain::{AgentProfile, ListingStatus, SubscriptionPlan};

/// Per-plan quota dials for the capacity estimator.
#[derive(Debug, Clone)]
pub struct PlanPolicy {
    pub free_max_listings: usize,
    pub free_max_photos_per_listing: usize,
    pub pro_max_listings: usize,
    pub pro_max_photos_per_listing: usize,
}

impl Default for PlanPolicy {
    fn default() -> Self {
        Self {
            free_max_listings: 5,
            free_max_photos_per_listing: 4,
            pro_max_listings: 50,
            pro_max_photos_per_listing: 20,
        }
    }
}

impl PlanPolicy {
    fn listing_limit(&self, plan: SubscriptionPlan) -> Option<usize> {
        match plan {
            SubscriptionPlan::Free => Some(self.free_max_listings),
            SubscriptionPlan::Pro => Some(self.pro_max_listings),
            SubscriptionPlan::Elite => None,
        }
    }

    fn photo_limit(&self, plan: SubscriptionPlan) -> Option<usize> {
        match plan {
            SubscriptionPlan::Free => Some(self.free_max_photos_per_listing),
            SubscriptionPlan::Pro => Some(self.pro_max_photos_per_listing),
            SubscriptionPlan::Elite => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityLevel {
    Comfortable,
    NearLimit,
    AtLimit,
}

impl CapacityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Comfortable => "Comfortable",
            Self::NearLimit => "Near Limit",
            Self::AtLimit => "At Limit",
        }
    }
}

/// Quota usage snapshot for the dashboard surface.
#[derive(Debug, Clone, Serialize)]
pub struct CapacityReport {
    pub plan: SubscriptionPlan,
    pub plan_label: &'static str,
    pub listings_used: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listings_limit: Option<usize>,
    pub photos_over_limit: usize,
    pub level: CapacityLevel,
    pub can_add_listing: bool,
    pub summary: String,
}

/// Counts active and sold listings against the plan's quota; delisted
/// entries do not consume capacity.
pub fn estimate(agent: &AgentProfile, policy: &PlanPolicy) -> CapacityReport {
    let plan = agent.subscription.plan;
    let listings_used = agent
        .listings
        .iter()
        .filter(|listing| listing.status != ListingStatus::Delisted)
        .count();
    let listings_limit = policy.listing_limit(plan);

    let photos_over_limit = match policy.photo_limit(plan) {
        Some(limit) => agent
            .listings
            .iter()
            .filter(|listing| listing.photo_urls.len() > limit)
            .count(),
        None => 0,
    };

    let (level, can_add_listing) = match listings_limit {
        Some(limit) if listings_used >= limit => (CapacityLevel::AtLimit, false),
        Some(limit) if listings_used + 1 >= limit => (CapacityLevel::NearLimit, true),
        _ => (CapacityLevel::Comfortable, true),
    };

    let summary = match listings_limit {
        Some(limit) => format!(
            "{} of {} listings used on the {} plan ({})",
            listings_used,
            limit,
            plan.label(),
            level.label()
        ),
        None => format!(
            "{} listings on the {} plan (no cap)",
            listings_used,
            plan.label()
        ),
    };

    CapacityReport {
        plan,
        plan_label: plan.label(),
        listings_used,
        listings_limit,
        photos_over_limit,
        level,
        can_add_listing,
        summary,
    }
}
