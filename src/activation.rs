//! Activation gate.
//!
//! Access is unlocked by typing a configured code. The comparison is
//! verbatim and the marker is stored in plain text: this is a UI gate, not
//! a security boundary. The current state is published on a watch channel
//! so the reminder runner can disarm when access is revoked.

use crate::error::{MunjizError, Result};
use crate::store::Storage;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Storage key of the activation marker.
pub const AUTH_KEY: &str = "ramadan_app_auth_status";

/// Marker value stored under [`AUTH_KEY`] while active.
pub const AUTH_ACTIVE: &str = "active";

pub struct ActivationGate {
    storage: Arc<dyn Storage>,
    code: String,
    active_tx: watch::Sender<bool>,
}

impl std::fmt::Debug for ActivationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivationGate")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl ActivationGate {
    /// Read the stored marker. A missing or unreadable marker means inactive.
    pub fn load(storage: Arc<dyn Storage>, code: impl Into<String>) -> Self {
        let active = read_marker(storage.as_ref()).unwrap_or(false);
        let (active_tx, _) = watch::channel(active);
        Self {
            storage,
            code: code.into(),
            active_tx,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        *self.active_tx.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.active_tx.subscribe()
    }

    /// Compare `code` with the configured code and persist the marker on a
    /// match. Returns whether the gate is now open.
    ///
    /// # Errors
    ///
    /// Returns [`MunjizError::Storage`] when the marker cannot be written;
    /// the gate stays closed in that case.
    pub fn activate(&self, code: &str) -> Result<bool> {
        if code != self.code {
            warn!("activation code rejected");
            return Ok(false);
        }
        let marker = serde_json::to_vec(AUTH_ACTIVE)
            .map_err(|e| MunjizError::Storage(format!("cannot encode activation marker: {e}")))?;
        self.storage.write(AUTH_KEY, &marker)?;
        self.active_tx.send_replace(true);
        info!("activated");
        Ok(true)
    }

    /// Re-read the stored marker, e.g. after another process activated or
    /// deactivated. Returns whether the state changed. An unreadable marker
    /// keeps the current state.
    pub fn reload(&self) -> bool {
        let Some(active) = read_marker(self.storage.as_ref()) else {
            return false;
        };
        let changed = self.active_tx.send_if_modified(|current| {
            let changed = *current != active;
            *current = active;
            changed
        });
        if changed {
            info!(active, "activation changed in storage");
        }
        changed
    }

    /// Clear the marker and close the gate.
    ///
    /// # Errors
    ///
    /// Returns [`MunjizError::Storage`] when the marker cannot be removed.
    pub fn deactivate(&self) -> Result<()> {
        self.storage.remove(AUTH_KEY)?;
        self.active_tx.send_replace(false);
        info!("deactivated");
        Ok(())
    }
}

/// `None` when storage cannot be read.
fn read_marker(storage: &dyn Storage) -> Option<bool> {
    match storage.read(AUTH_KEY) {
        Ok(Some(bytes)) => Some(
            serde_json::from_slice::<String>(&bytes)
                .map(|marker| marker == AUTH_ACTIVE)
                .unwrap_or(false),
        ),
        Ok(None) => Some(false),
        Err(e) => {
            warn!("cannot read activation marker: {e}");
            None
        }
    }
}
