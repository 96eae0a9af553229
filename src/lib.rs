//! Munjiz: a 30-day observance tracker core.
//!
//! The crate owns two things:
//! - **State store**: the persisted [`AppDocument`] (30 days, 4 weekly
//!   reviews, scripture checklist, theme, reminder settings), rehydrated by
//!   merging stored data over defaults and changed only through typed,
//!   scoped [`Update`]s.
//! - **Reminder scheduler**: an Idle/Armed state machine that polls the
//!   clock while armed and raises each due reminder once per calendar minute.
//!
//! # Architecture
//!
//! - [`store`]: `StateStore`, storage backends, reconciliation, updates
//! - [`model`]: document types
//! - [`scheduler`]: engine, async runner, clock, master toggle
//! - [`notifier`]: desktop / log notification sinks
//! - [`activation`]: the activation gate
//! - [`companion`]: consumer side of the generative text service
//! - [`config`]: TOML host configuration

pub mod activation;
pub mod companion;
pub mod config;
pub mod error;
pub mod model;
pub mod munjiz_dirs;
pub mod notifier;
pub mod scheduler;
pub mod store;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_utils;

pub use activation::ActivationGate;
pub use config::PlannerConfig;
pub use error::{MunjizError, Result};
pub use model::{
    AppDocument, DayNumber, NotificationSettings, ReminderKey, ReminderTime, UnitNumber,
};
pub use notifier::{Notifier, PermissionState};
pub use scheduler::{ReminderRunner, SchedulerState};
pub use store::{StateStore, Update};
pub use theme::AppTheme;
