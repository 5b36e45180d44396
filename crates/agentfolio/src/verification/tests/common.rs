use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::config::VerificationConfig;
use crate::verification::domain::PhoneNumber;
use crate::verification::service::VerificationService;
use crate::verification::store::{
    Challenge, ChallengeStore, ChallengeStoreError, CodeSendError, CodeSender,
};

pub(super) const FIXTURE_PHONE: &str = "+919876543210";

pub(super) fn send_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).single().expect("valid timestamp")
}

/// Challenge store over a plain map, with the same check-and-remove
/// atomicity the real store promises (one mutex guard spans both).
#[derive(Default)]
pub(super) struct MemoryChallengeStore {
    challenges: Mutex<HashMap<String, Challenge>>,
}

impl ChallengeStore for MemoryChallengeStore {
    fn put(&self, challenge: Challenge) -> Result<(), ChallengeStoreError> {
        self.challenges
            .lock()
            .expect("store mutex poisoned")
            .insert(challenge.phone.as_e164().to_string(), challenge);
        Ok(())
    }

    fn active(&self, phone: &PhoneNumber) -> Result<Option<Challenge>, ChallengeStoreError> {
        let guard = self.challenges.lock().expect("store mutex poisoned");
        Ok(guard.get(phone.as_e164()).cloned())
    }

    fn consume(
        &self,
        phone: &PhoneNumber,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ChallengeStoreError> {
        let mut guard = self.challenges.lock().expect("store mutex poisoned");
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

pub(super) struct OfflineStore;

impl ChallengeStore for OfflineStore {
    fn put(&self, _challenge: Challenge) -> Result<(), ChallengeStoreError> {
        Err(ChallengeStoreError::Unavailable("store offline".to_string()))
    }

    fn active(&self, _phone: &PhoneNumber) -> Result<Option<Challenge>, ChallengeStoreError> {
        Err(ChallengeStoreError::Unavailable("store offline".to_string()))
    }

    fn consume(
        &self,
        _phone: &PhoneNumber,
        _code: &str,
        _now: DateTime<Utc>,
    ) -> Result<bool, ChallengeStoreError> {
        Err(ChallengeStoreError::Unavailable("store offline".to_string()))
    }
}

/// Transport fake recording every delivered code.
#[derive(Default, Clone)]
pub(super) struct RecordingSender {
    pub(super) deliveries: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingSender {
    pub(super) fn last_code(&self) -> Option<String> {
        self.deliveries
            .lock()
            .expect("sender mutex poisoned")
            .last()
            .map(|(_, code)| code.clone())
    }

    pub(super) fn delivery_count(&self) -> usize {
        self.deliveries.lock().expect("sender mutex poisoned").len()
    }
}

impl CodeSender for RecordingSender {
    fn deliver(&self, phone: &PhoneNumber, code: &str) -> Result<(), CodeSendError> {
        self.deliveries
            .lock()
            .expect("sender mutex poisoned")
            .push((phone.as_e164().to_string(), code.to_string()));
        Ok(())
    }
}

pub(super) struct FailingSender;

impl CodeSender for FailingSender {
    fn deliver(&self, _phone: &PhoneNumber, _code: &str) -> Result<(), CodeSendError> {
        Err(CodeSendError::Transport("gateway timeout".to_string()))
    }
}

pub(super) fn build_service() -> (
    VerificationService<MemoryChallengeStore, RecordingSender>,
    Arc<MemoryChallengeStore>,
    RecordingSender,
) {
    let store = Arc::new(MemoryChallengeStore::default());
    let sender = RecordingSender::default();
    let service = VerificationService::new(
        store.clone(),
        Arc::new(sender.clone()),
        VerificationConfig::default(),
    );
    (service, store, sender)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
