use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::profiles::capacity::PlanPolicy;
use crate::profiles::domain::{
    AgentProfile, ContentId, Lead, ListingStatus, ProfileSubmission, PropertyListing,
    SubscriptionState,
};
use crate::profiles::guard::ProfilePolicy;
use crate::profiles::repository::{
    LeadSink, LeadSinkError, ProfileRepository, ProfileStoreError,
};
use crate::profiles::service::ProfileService;

pub(super) fn gate_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).single().expect("valid timestamp")
}

/// The canonical onboarding submission every commit test starts from.
pub(super) fn submission() -> ProfileSubmission {
    ProfileSubmission {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        city: "Hyderabad".to_string(),
        area: "Madhapur".to_string(),
        phone: "+919876543210".to_string(),
        date_of_birth: "1988-04-02".to_string(),
        experience_years: 10,
        slug: "jane-doe".to_string(),
        bio: "Helping families find homes in Madhapur.".to_string(),
        profile_photo_url: Some("https://cdn.example.com/jane.jpg".to_string()),
        template: "skyline".to_string(),
    }
}

pub(super) fn stored_profile(slug: &str) -> AgentProfile {
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
        listings: Vec::new(),
        testimonials: Vec::new(),
        faqs: Vec::new(),
        awards: Vec::new(),
        gallery: Vec::new(),
        builder_logos: Vec::new(),
    }
}

pub(super) fn listing(id: &str, status: ListingStatus, photos: usize) -> PropertyListing {
    PropertyListing {
        id: ContentId(id.to_string()),
        title: "3 BHK in Cyber Heights".to_string(),
        locality: "Madhapur".to_string(),
        price_inr: 9_500_000,
        bedrooms: Some(3),
        status,
        photo_urls: (0..photos)
            .map(|n| format!("https://cdn.example.com/photo-{n}.jpg"))
            .collect(),
    }
}

pub(super) fn lead() -> Lead {
    Lead {
        name: "R. Kumar".to_string(),
        phone: "+919812345678".to_string(),
        message: "Looking for a 2 BHK near the metro.".to_string(),
        received_at: gate_time(),
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<String, AgentProfile>>,
}

impl MemoryRepository {
    pub(super) fn with_profiles(profiles: Vec<AgentProfile>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.records.lock().expect("repository mutex poisoned");
            for profile in profiles {
                guard.insert(profile.slug.clone(), profile);
            }
        }
        store
    }

    pub(super) fn get(&self, slug: &str) -> Option<AgentProfile> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(slug)
            .cloned()
    }
}

impl ProfileRepository for MemoryRepository {
    fn insert(&self, profile: AgentProfile) -> Result<AgentProfile, ProfileStoreError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&profile.slug) {
            return Err(ProfileStoreError::SlugTaken);
        }
        guard.insert(profile.slug.clone(), profile.clone());
        Ok(profile)
    }

    fn update(&self, profile: AgentProfile) -> Result<(), ProfileStoreError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&profile.slug) {
            return Err(ProfileStoreError::NotFound);
        }
        guard.insert(profile.slug.clone(), profile);
        Ok(())
    }

    fn fetch(&self, slug: &str) -> Result<Option<AgentProfile>, ProfileStoreError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(slug).cloned())
    }

    fn slug_exists(&self, slug: &str) -> Result<bool, ProfileStoreError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.contains_key(slug))
    }
}

pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn insert(&self, _profile: AgentProfile) -> Result<AgentProfile, ProfileStoreError> {
        Err(ProfileStoreError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _profile: AgentProfile) -> Result<(), ProfileStoreError> {
        Err(ProfileStoreError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _slug: &str) -> Result<Option<AgentProfile>, ProfileStoreError> {
        Err(ProfileStoreError::Unavailable("database offline".to_string()))
    }

    fn slug_exists(&self, _slug: &str) -> Result<bool, ProfileStoreError> {
        Err(ProfileStoreError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLeads {
    pub(super) appended: Arc<Mutex<Vec<(String, Lead)>>>,
}

impl MemoryLeads {
    pub(super) fn captured(&self) -> Vec<(String, Lead)> {
        self.appended.lock().expect("leads mutex poisoned").clone()
    }
}

impl LeadSink for MemoryLeads {
    fn append(&self, slug: &str, lead: Lead) -> Result<(), LeadSinkError> {
        self.appended
            .lock()
            .expect("leads mutex poisoned")
            .push((slug.to_string(), lead));
        Ok(())
    }
}

pub(super) fn build_service(
    profiles: Vec<AgentProfile>,
) -> (
    ProfileService<MemoryRepository, MemoryLeads>,
    Arc<MemoryRepository>,
    MemoryLeads,
) {
    let repository = Arc::new(MemoryRepository::with_profiles(profiles));
    let leads = MemoryLeads::default();
    let service = ProfileService::new(
        repository.clone(),
        Arc::new(leads.clone()),
        ProfilePolicy::default(),
        PlanPolicy::default(),
    );
    (service, repository, leads)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_html_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf8 body")
}
