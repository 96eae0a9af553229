//! Synchronous reminder state machine.
//!
//! [`ReminderEngine`] holds no timers and reads no clock. The runner feeds it
//! gate changes and wall-clock instants; it answers with the reminders to
//! show. Keeping it synchronous makes every transition testable with plain
//! `#[test]` functions.

use crate::model::{NotificationSettings, ReminderKey, ReminderTime};
use crate::notifier::PermissionState;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

/// Whether the scheduler is polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchedulerState {
    #[default]
    Idle,
    Armed,
}

/// Inputs that decide whether the scheduler may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gates {
    pub master_enabled: bool,
    pub authorized: bool,
    pub permission: PermissionState,
}

/// A calendar minute. Two instants in the same minute of the same day are
/// equal; the same wall time on different days is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinuteStamp {
    pub date: NaiveDate,
    pub time: ReminderTime,
}

impl MinuteStamp {
    #[must_use]
    pub fn of(instant: NaiveDateTime) -> Self {
        Self {
            date: instant.date(),
            time: ReminderTime::from_timelike(&instant.time()),
        }
    }
}

/// One reminder that is due now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Firing {
    pub key: ReminderKey,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Default)]
pub struct ReminderEngine {
    state: SchedulerState,
    last_processed: Option<MinuteStamp>,
}

impl ReminderEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// The last minute that produced at least one firing.
    #[must_use]
    pub fn last_processed(&self) -> Option<MinuteStamp> {
        self.last_processed
    }

    /// Re-evaluate the gates. Returns the new state when it changed.
    ///
    /// Arming needs all three gates. Disarming happens when the master gate
    /// or authorization drops; a permission change alone never disarms.
    pub fn update_gates(&mut self, gates: Gates) -> Option<SchedulerState> {
        let next = match self.state {
            SchedulerState::Idle
                if gates.master_enabled && gates.authorized && gates.permission.is_granted() =>
            {
                SchedulerState::Armed
            }
            SchedulerState::Armed if !gates.master_enabled || !gates.authorized => {
                SchedulerState::Idle
            }
            current => current,
        };
        if next == self.state {
            return None;
        }
        info!(from = ?self.state, to = ?next, ?gates, "reminder scheduler transition");
        self.state = next;
        Some(next)
    }

    /// Evaluate the reminders for the minute containing `now`.
    ///
    /// Returns nothing while idle or when this minute was already handled.
    /// Firings come out in [`ReminderKey::ALL`] order.
    pub fn tick(&mut self, now: NaiveDateTime, settings: &NotificationSettings) -> Vec<Firing> {
        if self.state == SchedulerState::Idle {
            return Vec::new();
        }
        let stamp = MinuteStamp::of(now);
        if self.last_processed == Some(stamp) {
            debug!(time = %stamp.time, "minute already processed");
            return Vec::new();
        }

        let firings: Vec<Firing> = settings
            .reminders
            .iter()
            .filter(|(_, config)| config.enabled && config.time == stamp.time)
            .map(|(key, config)| Firing {
                key,
                title: config.label.clone(),
                body: config.message.clone(),
            })
            .collect();

        if !firings.is_empty() {
            self.last_processed = Some(stamp);
        }
        firings
    }
}
