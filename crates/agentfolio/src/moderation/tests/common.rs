use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::moderation::domain::{
    ContentKind, ItemId, ModerationItem, ReviewRecord, SubscriptionOverrideRecord,
};
use crate::moderation::repository::{AdminAuditLog, AuditError, ModerationQueue, QueueError};
use crate::moderation::service::ModerationService;
use crate::profiles::domain::{
    AgentProfile, Award, ContentId, FaqEntry, ListingStatus, PropertyListing, SubscriptionState,
    Testimonial,
};
use crate::profiles::repository::{ProfileRepository, ProfileStoreError};

pub(super) fn review_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 9, 30, 0).single().expect("valid timestamp")
}

/// Agent fixture carrying one of each moderatable content kind.
pub(super) fn fixture_profile(slug: &str) -> AgentProfile {
    AgentProfile {
        slug: slug.to_string(),
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        city: "Hyderabad".to_string(),
        area: "Madhapur".to_string(),
        phone: "+919876543210".to_string(),
        bio: "Helping families find homes in Madhapur.".to_string(),
        profile_photo_url: None,
        date_of_birth: NaiveDate::from_ymd_opt(1988, 4, 2).expect("valid date"),
        experience_years: 10,
        template: "classic".to_string(),
        subscription: SubscriptionState::free_tier(),
        is_published: true,
        listings: vec![PropertyListing {
            id: ContentId("lst-000001".to_string()),
            title: "3 BHK in Cyber Heights".to_string(),
            locality: "Madhapur".to_string(),
            price_inr: 9_500_000,
            bedrooms: Some(3),
            status: ListingStatus::Active,
            photo_urls: Vec::new(),
        }],
        testimonials: vec![Testimonial {
            id: ContentId("tst-000001".to_string()),
            author: "R. Kumar".to_string(),
            quote: "Found our flat in two weeks.".to_string(),
            visible: true,
        }],
        faqs: vec![FaqEntry {
            id: ContentId("faq-000001".to_string()),
            question: "Do you handle rentals?".to_string(),
            answer: "Yes, across west Hyderabad.".to_string(),
            visible: true,
        }],
        awards: vec![Award {
            id: ContentId("awd-000001".to_string()),
            title: "Top Seller 2024".to_string(),
            visible: true,
        }],
        gallery: Vec::new(),
        builder_logos: Vec::new(),
    }
}

pub(super) fn queued_item(id: &str, slug: &str, kind: ContentKind, content: &str) -> ModerationItem {
    ModerationItem {
        id: ItemId(id.to_string()),
        agent_slug: slug.to_string(),
        kind,
        content_id: Some(ContentId(content.to_string())),
        excerpt: "submitted content".to_string(),
        submitted_at: review_time(),
    }
}

pub(super) fn profile_item(id: &str, slug: &str) -> ModerationItem {
    ModerationItem {
        id: ItemId(id.to_string()),
        agent_slug: slug.to_string(),
        kind: ContentKind::Profile,
        content_id: None,
        excerpt: "full profile".to_string(),
        submitted_at: review_time(),
    }
}

#[derive(Default)]
pub(super) struct MemoryQueue {
    items: Mutex<Vec<ModerationItem>>,
}

impl ModerationQueue for MemoryQueue {
    fn enqueue(&self, item: ModerationItem) -> Result<(), QueueError> {
        self.items.lock().expect("queue mutex poisoned").push(item);
        Ok(())
    }

    fn pending(&self) -> Result<Vec<ModerationItem>, QueueError> {
        Ok(self.items.lock().expect("queue mutex poisoned").clone())
    }

    fn take(&self, id: &ItemId) -> Result<Option<ModerationItem>, QueueError> {
        let mut guard = self.items.lock().expect("queue mutex poisoned");
        let position = guard.iter().position(|item| &item.id == id);
        Ok(position.map(|index| guard.remove(index)))
    }
}

#[derive(Default)]
pub(super) struct MemoryProfiles {
    records: Mutex<HashMap<String, AgentProfile>>,
}

impl MemoryProfiles {
    pub(super) fn with_profile(profile: AgentProfile) -> Self {
        let store = Self::default();
        store
            .records
            .lock()
            .expect("profile mutex poisoned")
            .insert(profile.slug.clone(), profile);
        store
    }

    pub(super) fn get(&self, slug: &str) -> AgentProfile {
        self.records
            .lock()
            .expect("profile mutex poisoned")
            .get(slug)
            .cloned()
            .expect("fixture profile present")
    }
}

impl ProfileRepository for MemoryProfiles {
    fn insert(&self, profile: AgentProfile) -> Result<AgentProfile, ProfileStoreError> {
        let mut guard = self.records.lock().expect("profile mutex poisoned");
        if guard.contains_key(&profile.slug) {
            return Err(ProfileStoreError::SlugTaken);
        }
        guard.insert(profile.slug.clone(), profile.clone());
        Ok(profile)
    }

    fn update(&self, profile: AgentProfile) -> Result<(), ProfileStoreError> {
        let mut guard = self.records.lock().expect("profile mutex poisoned");
        if !guard.contains_key(&profile.slug) {
            return Err(ProfileStoreError::NotFound);
        }
        guard.insert(profile.slug.clone(), profile);
        Ok(())
    }

    fn fetch(&self, slug: &str) -> Result<Option<AgentProfile>, ProfileStoreError> {
        let guard = self.records.lock().expect("profile mutex poisoned");
        Ok(guard.get(slug).cloned())
    }

    fn slug_exists(&self, slug: &str) -> Result<bool, ProfileStoreError> {
        let guard = self.records.lock().expect("profile mutex poisoned");
        Ok(guard.contains_key(slug))
    }
}

#[derive(Default)]
pub(super) struct RecordingAudit {
    reviews: Mutex<Vec<ReviewRecord>>,
    overrides: Mutex<Vec<SubscriptionOverrideRecord>>,
}

impl RecordingAudit {
    pub(super) fn reviews(&self) -> Vec<ReviewRecord> {
        self.reviews.lock().expect("audit mutex poisoned").clone()
    }

    pub(super) fn overrides(&self) -> Vec<SubscriptionOverrideRecord> {
        self.overrides.lock().expect("audit mutex poisoned").clone()
    }
}

impl AdminAuditLog for RecordingAudit {
    fn record_review(&self, record: ReviewRecord) -> Result<(), AuditError> {
        self.reviews
            .lock()
            .expect("audit mutex poisoned")
            .push(record);
        Ok(())
    }

    fn record_override(&self, record: SubscriptionOverrideRecord) -> Result<(), AuditError> {
        self.overrides
            .lock()
            .expect("audit mutex poisoned")
            .push(record);
        Ok(())
    }
}

pub(super) fn build_service(
    profile: AgentProfile,
) -> (
    ModerationService<MemoryQueue, MemoryProfiles, RecordingAudit>,
    Arc<MemoryQueue>,
    Arc<MemoryProfiles>,
    Arc<RecordingAudit>,
) {
    let queue = Arc::new(MemoryQueue::default());
    let profiles = Arc::new(MemoryProfiles::with_profile(profile));
    let audit = Arc::new(RecordingAudit::default());
    let service = ModerationService::new(queue.clone(), profiles.clone(), audit.clone());
    (service, queue, profiles, audit)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
