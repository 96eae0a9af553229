//! Typed, scoped updates to the [`AppDocument`].
//!
//! Each variant addresses exactly one node of the document. Patches carry
//! `Option` fields: `None` leaves the current value in place. Identity
//! fields (day number, week number, task ids) have no patch slot.

use crate::model::day::{Prayers, Reflection, ScriptureProgress, SpiritualHabits, Task};
use crate::model::{
    AppDocument, DayEntry, DayNumber, ReminderConfig, ReminderKey, ReminderTime, UnitNumber,
    WeekNumber, WeeklyReview,
};
use crate::theme::AppTheme;

/// Partial replacement for a [`Task`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub description: Option<String>,
    pub is_completed: Option<bool>,
    pub time: Option<String>,
}

impl TaskPatch {
    fn apply(self, task: &mut Task) {
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(done) = self.is_completed {
            task.is_completed = done;
        }
        if let Some(time) = self.time {
            task.time = Some(time);
        }
    }
}

/// Partial replacement for a [`DayEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPatch {
    pub date_label: Option<String>,
    pub frog_task: Option<TaskPatch>,
    pub other_tasks: [Option<TaskPatch>; 2],
    pub spiritual_habits: Option<SpiritualHabits>,
    pub prayers: Option<Prayers>,
    pub scripture_progress: Option<ScriptureProgress>,
    pub reflection: Option<Reflection>,
    pub is_locked: Option<bool>,
}

impl DayPatch {
    fn apply(self, entry: &mut DayEntry) {
        if let Some(label) = self.date_label {
            entry.date_label = label;
        }
        if let Some(patch) = self.frog_task {
            patch.apply(&mut entry.frog_task);
        }
        for (slot, patch) in entry.other_tasks.iter_mut().zip(self.other_tasks) {
            if let Some(patch) = patch {
                patch.apply(slot);
            }
        }
        if let Some(habits) = self.spiritual_habits {
            entry.spiritual_habits = habits;
        }
        if let Some(prayers) = self.prayers {
            entry.prayers = prayers;
        }
        if let Some(progress) = self.scripture_progress {
            entry.scripture_progress = progress;
        }
        if let Some(reflection) = self.reflection {
            entry.reflection = reflection;
        }
        if let Some(locked) = self.is_locked {
            entry.is_locked = locked;
        }
    }
}

/// Partial replacement for a [`WeeklyReview`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewPatch {
    pub most_achieved: Option<String>,
    pub most_tiring: Option<String>,
    pub reduce_next_week: Option<String>,
    pub blessing_to_thank: Option<String>,
}

impl ReviewPatch {
    fn apply(self, review: &mut WeeklyReview) {
        let slots = [
            (self.most_achieved, &mut review.most_achieved),
            (self.most_tiring, &mut review.most_tiring),
            (self.reduce_next_week, &mut review.reduce_next_week),
            (self.blessing_to_thank, &mut review.blessing_to_thank),
        ];
        for (value, slot) in slots {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// Partial replacement for a [`ReminderConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderPatch {
    pub enabled: Option<bool>,
    pub time: Option<ReminderTime>,
    pub label: Option<String>,
    pub message: Option<String>,
}

impl ReminderPatch {
    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.time.is_none()
            && self.label.is_none()
            && self.message.is_none()
    }

    fn apply(self, config: &mut ReminderConfig) {
        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }
        if let Some(time) = self.time {
            config.time = time;
        }
        if let Some(label) = self.label {
            config.label = label;
        }
        if let Some(message) = self.message {
            config.message = message;
        }
    }
}

/// The closed set of document mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Day { day: DayNumber, patch: Box<DayPatch> },
    Review { week: WeekNumber, patch: ReviewPatch },
    /// Set checklist unit `unit` to `done`.
    ChecklistUnit { unit: UnitNumber, done: bool },
    Theme(AppTheme),
    CurrentDay(DayNumber),
    MasterEnabled(bool),
    Reminder { key: ReminderKey, patch: ReminderPatch },
}

impl Update {
    /// Shorthand for [`Update::Day`].
    #[must_use]
    pub fn day(day: DayNumber, patch: DayPatch) -> Self {
        Self::Day {
            day,
            patch: Box::new(patch),
        }
    }

    /// Whether applying this update changes the notification sub-tree.
    #[must_use]
    pub fn touches_notifications(&self) -> bool {
        matches!(self, Self::MasterEnabled(_) | Self::Reminder { .. })
    }

    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Day { .. } => "day",
            Self::Review { .. } => "review",
            Self::ChecklistUnit { .. } => "checklist_unit",
            Self::Theme(_) => "theme",
            Self::CurrentDay(_) => "current_day",
            Self::MasterEnabled(_) => "master_enabled",
            Self::Reminder { .. } => "reminder",
        }
    }

    /// Apply to `doc`. Every address is valid by construction.
    pub(crate) fn apply_to(self, doc: &mut AppDocument) {
        match self {
            Self::Day { day, patch } => patch.apply(&mut doc.days[day.index()]),
            Self::Review { week, patch } => patch.apply(&mut doc.weekly_reviews[week.index()]),
            Self::ChecklistUnit { unit, done } => doc.scripture_checklist[unit.index()] = done,
            Self::Theme(theme) => doc.theme = theme,
            Self::CurrentDay(day) => doc.current_day = day,
            Self::MasterEnabled(enabled) => doc.notifications.master_enabled = enabled,
            Self::Reminder { key, patch } => {
                patch.apply(doc.notifications.reminders.get_mut(key));
            }
        }
    }
}
