//! Reminder scheduler.
//!
//! [`engine`] holds the Idle/Armed state machine and minute de-duplication,
//! [`runner`] drives it from a tokio interval, and [`clock`] supplies the
//! wall time. [`set_master_enabled`] is the user-facing toggle that asks for
//! notification permission before turning reminders on.

pub mod clock;
pub mod engine;
pub mod runner;

use crate::error::Result;
use crate::notifier::Notifier;
use crate::store::{StateStore, Update};
use tracing::{info, warn};

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{Firing, Gates, MinuteStamp, ReminderEngine, SchedulerState};
pub use runner::ReminderRunner;

/// Turn the master reminder gate on or off. Returns the resulting value.
///
/// Turning on asks the notifier for permission unless it is already
/// granted, and only flips the gate when permission ends up granted.
/// Turning off never prompts.
///
/// # Errors
///
/// Propagates [`StateStore::apply`] failures.
pub async fn set_master_enabled(
    store: &mut StateStore,
    notifier: &dyn Notifier,
    enabled: bool,
) -> Result<bool> {
    if !enabled {
        store.apply(Update::MasterEnabled(false))?;
        info!("reminders turned off");
        return Ok(false);
    }

    let mut permission = notifier.permission_state();
    if !permission.is_granted() {
        permission = notifier.request_permission().await;
    }
    if !permission.is_granted() {
        warn!(?permission, "notification permission not granted, reminders stay off");
        return Ok(store.notifications().master_enabled);
    }

    store.apply(Update::MasterEnabled(true))?;
    info!("reminders turned on");
    Ok(true)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::notifier::PermissionState;
    use crate::store::MemoryStorage;
    use crate::test_utils::RecordingNotifier;
    use std::sync::Arc;

    fn store() -> StateStore {
        StateStore::initialize(Arc::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn enabling_prompts_and_respects_grant() {
        let mut store = store();
        let notifier =
            RecordingNotifier::with_permission(PermissionState::Default, PermissionState::Granted);
        assert!(set_master_enabled(&mut store, &notifier, true).await.unwrap());
        assert!(store.notifications().master_enabled);
        assert_eq!(notifier.permission_state(), PermissionState::Granted);
    }

    #[tokio::test]
    async fn denied_permission_keeps_gate_off() {
        let mut store = store();
        let notifier =
            RecordingNotifier::with_permission(PermissionState::Default, PermissionState::Denied);
        assert!(!set_master_enabled(&mut store, &notifier, true).await.unwrap());
        assert!(!store.notifications().master_enabled);
    }

    #[tokio::test]
    async fn disabling_never_prompts() {
        let mut store = store();
        let notifier = RecordingNotifier::granted();
        set_master_enabled(&mut store, &notifier, true).await.unwrap();

        let notifier =
            RecordingNotifier::with_permission(PermissionState::Default, PermissionState::Granted);
        assert!(!set_master_enabled(&mut store, &notifier, false).await.unwrap());
        assert!(!store.notifications().master_enabled);
        assert_eq!(notifier.permission_state(), PermissionState::Default);
    }
}
