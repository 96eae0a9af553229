//! The single owner of the application document.
//!
//! [`StateStore`] loads the document from a [`Storage`] backend at startup,
//! hands out read access, and applies typed [`Update`]s. Every successful
//! update is written back as one JSON document. Changes to the notification
//! sub-tree are published on a `tokio::sync::watch` channel so the reminder
//! runner never has to reach into the store.

pub mod merge;
pub mod storage;
pub mod update;

use crate::error::{MunjizError, Result};
use crate::model::{AppDocument, DayEntry, DayNumber, NotificationSettings};
use merge::Reconcile;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub use storage::{FileStorage, MemoryStorage, Storage};
pub use update::{DayPatch, ReminderPatch, ReviewPatch, TaskPatch, Update};

/// Storage key of the persisted document.
pub const DOCUMENT_KEY: &str = "ramadan_tracker_pro_data";

/// Owns the [`AppDocument`] and its persistence.
pub struct StateStore {
    storage: Arc<dyn Storage>,
    document: AppDocument,
    notifications_tx: watch::Sender<NotificationSettings>,
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("current_day", &self.document.current_day)
            .finish_non_exhaustive()
    }
}

impl StateStore {
    /// Load the document from `storage`, falling back to defaults.
    ///
    /// Never fails: unreadable or unparsable data is logged and replaced by
    /// a fresh document.
    pub fn initialize(storage: Arc<dyn Storage>) -> Self {
        let document = match read_document(storage.as_ref()) {
            Ok(Some(document)) => document,
            Ok(None) => {
                info!("no stored document, starting fresh");
                AppDocument::default()
            }
            Err(e) => {
                warn!("{e}, starting fresh");
                AppDocument::default()
            }
        };
        let (notifications_tx, _) = watch::channel(document.notifications.clone());
        Self {
            storage,
            document,
            notifications_tx,
        }
    }

    /// Current document.
    #[must_use]
    pub fn document(&self) -> &AppDocument {
        &self.document
    }

    /// Entry for `day`.
    #[must_use]
    pub fn day(&self, day: DayNumber) -> &DayEntry {
        self.document.day(day)
    }

    /// Current notification settings.
    #[must_use]
    pub fn notifications(&self) -> &NotificationSettings {
        &self.document.notifications
    }

    /// Receiver that observes every change to the notification settings.
    #[must_use]
    pub fn subscribe_notifications(&self) -> watch::Receiver<NotificationSettings> {
        self.notifications_tx.subscribe()
    }

    /// Apply one update and persist.
    ///
    /// # Errors
    ///
    /// [`MunjizError::Storage`] means the update is applied in memory but
    /// was not written.
    pub fn apply(&mut self, update: Update) -> Result<()> {
        self.apply_batch([update])
    }

    /// Apply several updates with a single write.
    ///
    /// # Errors
    ///
    /// Same as [`StateStore::apply`].
    pub fn apply_batch(&mut self, updates: impl IntoIterator<Item = Update>) -> Result<()> {
        let updates: Vec<Update> = updates.into_iter().collect();
        if updates.is_empty() {
            return Ok(());
        }

        let touches_notifications = updates.iter().any(Update::touches_notifications);
        for update in updates {
            debug!(kind = update.kind(), "applying update");
            update.apply_to(&mut self.document);
        }

        if touches_notifications {
            self.publish_notifications();
        }

        self.persist()
    }

    /// Replace the in-memory document with what storage holds now.
    ///
    /// Picks up writes made by another process over the same storage.
    /// Returns whether the notification settings changed; subscribers are
    /// notified in that case. A missing document resets to defaults, while
    /// an unreadable one keeps the current document.
    pub fn reload(&mut self) -> bool {
        match read_document(self.storage.as_ref()) {
            Ok(stored) => {
                let document = stored.unwrap_or_default();
                if document != self.document {
                    debug!("stored document changed, reloading");
                    self.document = document;
                }
            }
            Err(e) => {
                warn!("{e}, keeping current document");
                return false;
            }
        }
        self.publish_notifications()
    }

    fn publish_notifications(&self) -> bool {
        let current = &self.document.notifications;
        self.notifications_tx.send_if_modified(|published| {
            if published == current {
                false
            } else {
                *published = current.clone();
                true
            }
        })
    }

    /// Write the whole document to storage.
    ///
    /// # Errors
    ///
    /// Returns [`MunjizError::Storage`] when serialization or the write fails.
    pub fn persist(&self) -> Result<()> {
        let bytes = serde_json::to_vec(&self.document)
            .map_err(|e| MunjizError::Storage(format!("cannot serialize document: {e}")))?;
        self.storage
            .write(DOCUMENT_KEY, &bytes)
            .inspect_err(|e| error!("cannot persist document: {e}"))
    }
}

/// Read and reconcile the persisted document. `None` means nothing is stored.
fn read_document(storage: &dyn Storage) -> Result<Option<AppDocument>> {
    let bytes = match storage.read(DOCUMENT_KEY) {
        Ok(Some(bytes)) if !bytes.iter().all(u8::is_ascii_whitespace) => bytes,
        Ok(_) => return Ok(None),
        Err(e) => {
            return Err(MunjizError::Storage(format!(
                "cannot read stored document: {e}"
            )));
        }
    };

    let value = serde_json::from_slice::<serde_json::Value>(&bytes).map_err(|e| {
        MunjizError::Storage(format!("stored document is not valid JSON: {e}"))
    })?;
    debug!("reconciling stored document");
    Ok(Some(AppDocument::default().reconcile(&value)))
}
