use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use agentfolio::moderation::{
    AdminAuditLog, AuditError, ItemId, ModerationItem, ModerationQueue, QueueError, ReviewRecord,
    SubscriptionOverrideRecord,
};
use agentfolio::onboarding::{DraftStore, DraftStoreError, WizardDraft};
use agentfolio::profiles::{
    AgentProfile, Lead, LeadSink, LeadSinkError, ProfileRepository, ProfileStoreError,
};
use agentfolio::verification::{
    Challenge, ChallengeStore, ChallengeStoreError, CodeSendError, CodeSender, PhoneNumber,
};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    records: Arc<Mutex<HashMap<String, AgentProfile>>>,
}

impl ProfileRepository for InMemoryProfileRepository {
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
        if guard.contains_key(&profile.slug) {
            guard.insert(profile.slug.clone(), profile);
            Ok(())
        } else {
            Err(ProfileStoreError::NotFound)
        }
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadSink {
    leads: Arc<Mutex<Vec<(String, Lead)>>>,
}

impl InMemoryLeadSink {
    pub(crate) fn captured(&self) -> Vec<(String, Lead)> {
        self.leads.lock().expect("lead mutex poisoned").clone()
    }
}

impl LeadSink for InMemoryLeadSink {
    fn append(&self, slug: &str, lead: Lead) -> Result<(), LeadSinkError> {
        self.leads
            .lock()
            .expect("lead mutex poisoned")
            .push((slug.to_string(), lead));
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryChallengeStore {
    challenges: Arc<Mutex<HashMap<String, Challenge>>>,
}

impl ChallengeStore for InMemoryChallengeStore {
    fn put(&self, challenge: Challenge) -> Result<(), ChallengeStoreError> {
        self.challenges
            .lock()
            .expect("challenge mutex poisoned")
            .insert(challenge.phone.as_e164().to_string(), challenge);
        Ok(())
    }

    fn active(&self, phone: &PhoneNumber) -> Result<Option<Challenge>, ChallengeStoreError> {
        let guard = self.challenges.lock().expect("challenge mutex poisoned");
        Ok(guard.get(phone.as_e164()).cloned())
    }

    fn consume(
        &self,
        phone: &PhoneNumber,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ChallengeStoreError> {
        let mut guard = self.challenges.lock().expect("challenge mutex poisoned");
        let matches = guard
            .get(phone.as_e164())
            .map(|challenge| challenge.code == code && !challenge.is_expired(now))
            .unwrap_or(false);
        if matches {
            guard.remove(phone.as_e164());
        }
        Ok(matches)
    }
}

/// Development transport: logs the code instead of calling the WhatsApp
/// gateway, and keeps the last code around for the CLI demo.
#[derive(Default, Clone)]
pub(crate) struct DevCodeSender {
    last: Arc<Mutex<Option<String>>>,
}

impl DevCodeSender {
    pub(crate) fn last_code(&self) -> Option<String> {
        self.last.lock().expect("sender mutex poisoned").clone()
    }
}

impl CodeSender for DevCodeSender {
    fn deliver(&self, phone: &PhoneNumber, code: &str) -> Result<(), CodeSendError> {
        tracing::info!(phone = %phone, code, "verification code (dev transport)");
        *self.last.lock().expect("sender mutex poisoned") = Some(code.to_string());
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryModerationQueue {
    items: Arc<Mutex<Vec<ModerationItem>>>,
}

impl ModerationQueue for InMemoryModerationQueue {
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditLog {
    reviews: Arc<Mutex<Vec<ReviewRecord>>>,
    overrides: Arc<Mutex<Vec<SubscriptionOverrideRecord>>>,
}

impl InMemoryAuditLog {
    pub(crate) fn reviews(&self) -> Vec<ReviewRecord> {
        self.reviews.lock().expect("audit mutex poisoned").clone()
    }
}

impl AdminAuditLog for InMemoryAuditLog {
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

/// Draft persistence for the CLI demo wizard. The web deployment swaps in
/// a browser-storage adapter behind the same trait.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDraftStore {
    draft: Arc<Mutex<Option<WizardDraft>>>,
}

impl DraftStore for InMemoryDraftStore {
    fn save(&self, draft: &WizardDraft) -> Result<(), DraftStoreError> {
        *self.draft.lock().expect("draft mutex poisoned") = Some(draft.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<WizardDraft>, DraftStoreError> {
        Ok(self.draft.lock().expect("draft mutex poisoned").clone())
    }

    fn clear(&self) -> Result<(), DraftStoreError> {
        *self.draft.lock().expect("draft mutex poisoned") = None;
        Ok(())
    }
}
