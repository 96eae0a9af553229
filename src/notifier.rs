//! Outbound notification sinks.
//!
//! The scheduler only sees the [`Notifier`] trait. [`DesktopNotifier`] shows
//! native notifications through `notify-rust`; [`LogNotifier`] writes them to
//! the tracing log for headless sessions.

use crate::config::NotifierBackend;
use crate::error::{MunjizError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Prefix added to every desktop notification title.
pub const TITLE_PREFIX: &str = "🌙 ";

/// Whether the host allows notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionState {
    Granted,
    Denied,
    /// Not asked yet.
    Default,
}

impl PermissionState {
    #[must_use]
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// A sink for reminder notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Current permission without prompting.
    fn permission_state(&self) -> PermissionState;

    /// Ask for permission. Returns the resulting state (never `Default`).
    async fn request_permission(&self) -> PermissionState;

    /// Show one notification.
    async fn notify(&self, title: &str, body: &str) -> Result<()>;
}

/// Native desktop notifications.
#[derive(Debug)]
pub struct DesktopNotifier {
    app_name: String,
    permission: Mutex<PermissionState>,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            permission: Mutex::new(PermissionState::Default),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new("munjiz")
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    fn permission_state(&self) -> PermissionState {
        self.permission
            .lock()
            .map(|state| *state)
            .unwrap_or(PermissionState::Default)
    }

    async fn request_permission(&self) -> PermissionState {
        // Desktop notification daemons do not prompt; asking is granting.
        if let Ok(mut state) = self.permission.lock() {
            *state = PermissionState::Granted;
        }
        PermissionState::Granted
    }

    async fn notify(&self, title: &str, body: &str) -> Result<()> {
        let summary = format!("{TITLE_PREFIX}{title}");
        let body = body.to_owned();
        let app_name = self.app_name.clone();
        debug!(%summary, "showing desktop notification");

        tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .summary(&summary)
                .body(&body)
                .appname(&app_name)
                .show()
                .map(|_| ())
                .map_err(|e| MunjizError::Notification(e.to_string()))
        })
        .await
        .map_err(|e| MunjizError::Notification(format!("notification task failed: {e}")))?
    }
}

/// Writes notifications to the log instead of the desktop.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn permission_state(&self) -> PermissionState {
        PermissionState::Granted
    }

    async fn request_permission(&self) -> PermissionState {
        PermissionState::Granted
    }

    async fn notify(&self, title: &str, body: &str) -> Result<()> {
        info!(title, body, "reminder");
        Ok(())
    }
}

/// Construct the configured notifier backend.
#[must_use]
pub fn build_notifier(backend: NotifierBackend) -> Arc<dyn Notifier> {
    match backend {
        NotifierBackend::Desktop => Arc::new(DesktopNotifier::default()),
        NotifierBackend::Log => Arc::new(LogNotifier),
    }
}
