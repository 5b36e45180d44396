use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profiles::domain::{BillingInterval, SubscriptionPlan, SubscriptionState};
use crate::profiles::repository::{ProfileRepository, ProfileStoreError};

use super::domain::{
    ContentKind, ItemId, ModerationItem, ReviewAction, ReviewRecord, SubscriptionOverrideRecord,
};
use super::repository::{AdminAuditLog, AuditError, ModerationQueue, QueueError};

/// Admin console operations: the pending-review queue, content takedowns,
/// and subscription overrides. Approval only dismisses the queue item;
/// removal additionally flips the underlying entity off the public page.
pub struct ModerationService<Q, R, A> {
    queue: Arc<Q>,
    profiles: Arc<R>,
    audit: Arc<A>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub item_id: ItemId,
    pub remove: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Outcome of a review. `already_reviewed` means the item was gone from
/// the queue before this call; the caller still gets a success so retried
/// admin clicks stay harmless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewOutcome {
    pub item_id: ItemId,
    pub action: ReviewAction,
    pub already_reviewed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverrideRequest {
    pub plan: SubscriptionPlan,
    pub interval: BillingInterval,
    pub ends_at: DateTime<Utc>,
    pub is_subscribed: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("agent '{0}' not found")]
    AgentNotFound(String),
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error(transparent)]
    Audit(#[from] AuditError),
    #[error("profile store unavailable: {0}")]
    Store(String),
}

impl ModerationError {
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Self::AgentNotFound(_))
    }
}

impl<Q, R, A> ModerationService<Q, R, A>
where
    Q: ModerationQueue,
    R: ProfileRepository,
    A: AdminAuditLog,
{
    pub fn new(queue: Arc<Q>, profiles: Arc<R>, audit: Arc<A>) -> Self {
        Self {
            queue,
            profiles,
            audit,
        }
    }

    pub fn pending(&self) -> Result<Vec<ModerationItem>, ModerationError> {
        Ok(self.queue.pending()?)
    }

    pub fn review(
        &self,
        request: ReviewRequest,
        now: DateTime<Utc>,
    ) -> Result<ReviewOutcome, ModerationError> {
        let action = if request.remove {
            ReviewAction::Removed
        } else {
            ReviewAction::Approved
        };

        let Some(item) = self.queue.take(&request.item_id)? else {
            tracing::debug!(item = %request.item_id.0, "review of an already-dismissed item");
            return Ok(ReviewOutcome {
                item_id: request.item_id,
                action,
                already_reviewed: true,
            });
        };

        if request.remove {
            self.apply_removal(&item)?;
        }

        tracing::info!(
            item = %item.id.0,
            agent = %item.agent_slug,
            kind = item.kind.label(),
            action = action.label(),
            "moderation review recorded"
        );
        self.audit.record_review(ReviewRecord {
            item_id: item.id.clone(),
            agent_slug: item.agent_slug,
            kind: item.kind,
            action,
            reason: request.reason,
            reviewed_at: now,
        })?;

        Ok(ReviewOutcome {
            item_id: item.id,
            action,
            already_reviewed: false,
        })
    }

    pub fn override_subscription(
        &self,
        slug: &str,
        request: OverrideRequest,
        now: DateTime<Utc>,
    ) -> Result<SubscriptionState, ModerationError> {
        let mut profile = self
            .profiles
            .fetch(slug)
            .map_err(store_outage)?
            .ok_or_else(|| ModerationError::AgentNotFound(slug.to_string()))?;

        profile.subscription = SubscriptionState {
            plan: request.plan,
            interval: request.interval,
            ends_at: request.ends_at,
            is_subscribed: request.is_subscribed,
        };
        let subscription = profile.subscription.clone();
        self.profiles.update(profile).map_err(store_outage)?;

        tracing::info!(
            agent = slug,
            plan = request.plan.label(),
            is_subscribed = request.is_subscribed,
            "admin subscription override applied"
        );
        self.audit.record_override(SubscriptionOverrideRecord {
            agent_slug: slug.to_string(),
            plan: request.plan,
            interval: request.interval,
            ends_at: request.ends_at,
            is_subscribed: request.is_subscribed,
            reason: request.reason,
            recorded_at: now,
        })?;

        Ok(subscription)
    }

    /// Flips the entity the item points at so it drops off the public
    /// page. A content id that no longer matches anything means the agent
    /// deleted it first; that still counts as removed.
    fn apply_removal(&self, item: &ModerationItem) -> Result<(), ModerationError> {
        let mut profile = self
            .profiles
            .fetch(&item.agent_slug)
            .map_err(store_outage)?
            .ok_or_else(|| ModerationError::AgentNotFound(item.agent_slug.clone()))?;

        match item.kind {
            ContentKind::Profile => profile.is_published = false,
            ContentKind::Property => {
                if let Some(id) = &item.content_id {
                    if let Some(listing) = profile.listings.iter_mut().find(|l| &l.id == id) {
                        listing.status = crate::profiles::domain::ListingStatus::Delisted;
                    }
                }
            }
            ContentKind::Testimonial => hide_by_id(&mut profile.testimonials, item, |t| {
                (&t.id, &mut t.visible)
            }),
            ContentKind::Faq => hide_by_id(&mut profile.faqs, item, |f| (&f.id, &mut f.visible)),
            ContentKind::Award => hide_by_id(&mut profile.awards, item, |a| (&a.id, &mut a.visible)),
            ContentKind::GalleryImage => {
                hide_by_id(&mut profile.gallery, item, |g| (&g.id, &mut g.visible))
            }
            ContentKind::BuilderLogo => {
                hide_by_id(&mut profile.builder_logos, item, |b| (&b.id, &mut b.visible))
            }
        }

        self.profiles.update(profile).map_err(store_outage)
    }
}

fn hide_by_id<T>(
    entries: &mut [T],
    item: &ModerationItem,
    accessor: impl Fn(&mut T) -> (&crate::profiles::domain::ContentId, &mut bool),
) {
    let Some(id) = &item.content_id else {
        return;
    };
    for entry in entries.iter_mut() {
        let (entry_id, visible) = accessor(entry);
        if entry_id == id {
            *visible = false;
            return;
        }
    }
}

fn store_outage(err: ProfileStoreError) -> ModerationError {
    match err {
        ProfileStoreError::NotFound => ModerationError::Store("agent record vanished".to_string()),
        other => ModerationError::Store(other.to_string()),
    }
}
