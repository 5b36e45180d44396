use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::domain::WizardDraft;

/// Durable client-local destination for drafts (browser storage behind an
/// adapter, an on-disk file in the CLI). Failures here are non-fatal: the
/// draft is a convenience, not the source of truth.
pub trait DraftStore: Send + Sync {
    fn save(&self, draft: &WizardDraft) -> Result<(), DraftStoreError>;
    fn load(&self) -> Result<Option<WizardDraft>, DraftStoreError>;
    fn clear(&self) -> Result<(), DraftStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DraftStoreError {
    #[error("draft store unavailable: {0}")]
    Unavailable(String),
}

/// Fire-and-forget persistence seam the wizard writes through. Must never
/// block a step transition.
pub trait DraftSaver: Send + Sync {
    fn queue(&self, draft: &WizardDraft);
    fn clear(&self);
}

enum Command {
    Save(Box<WizardDraft>),
    Clear,
}

/// Timer-driven autosave: mutations within the debounce window coalesce
/// into a single flush once input goes quiet. Store failures are swallowed
/// with a warning.
pub struct DebouncedAutosave {
    tx: mpsc::UnboundedSender<Command>,
}

impl DebouncedAutosave {
    /// Spawns the flush worker on the current runtime.
    pub fn spawn(store: Arc<dyn DraftStore>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(flush_worker(store, rx, debounce));
        Self { tx }
    }
}

impl DraftSaver for DebouncedAutosave {
    fn queue(&self, draft: &WizardDraft) {
        // A closed channel means the worker is gone; dropping the save is
        // the contract, not an error.
        let _ = self.tx.send(Command::Save(Box::new(draft.clone())));
    }

    fn clear(&self) {
        let _ = self.tx.send(Command::Clear);
    }
}

async fn flush_worker(
    store: Arc<dyn DraftStore>,
    mut rx: mpsc::UnboundedReceiver<Command>,
    debounce: Duration,
) {
    let mut pending: Option<Box<WizardDraft>> = None;

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Save(draft)) => pending = Some(draft),
                Some(Command::Clear) => {
                    pending = None;
                    if let Err(error) = store.clear() {
                        tracing::warn!(%error, "draft clear failed");
                    }
                }
                None => {
                    flush(&store, pending.take());
                    return;
                }
            },
            // Recreated on every message, so the timer measures inactivity.
            _ = tokio::time::sleep(debounce), if pending.is_some() => {
                flush(&store, pending.take());
            }
        }
    }
}

fn flush(store: &Arc<dyn DraftStore>, pending: Option<Box<WizardDraft>>) {
    if let Some(draft) = pending {
        if let Err(error) = store.save(&draft) {
            tracing::warn!(%error, "draft autosave failed");
        }
    }
}
