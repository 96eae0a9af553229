//! The persisted application document.
//!
//! [`AppDocument`] is the single root owned by [`crate::store::StateStore`].
//! Its sequences are fixed-size arrays, so the 30-day / 4-week / 30-unit
//! shape cannot change after construction. The document is only ever built
//! from defaults, optionally reconciled against storage; it has no
//! `Deserialize` impl of its own.

pub mod day;
pub mod reminder;
pub mod review;

use crate::error::{MunjizError, Result};
use crate::store::merge::{reconcile_as_leaf, reconcile_fields};
use crate::theme::AppTheme;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use day::{DayEntry, Feeling, Prayers, Reflection, ScriptureProgress, SpiritualHabits, Task};
pub use reminder::{NotificationSettings, ReminderConfig, ReminderKey, ReminderTime, Reminders};
pub use review::WeeklyReview;

/// Number of days in the observance period.
pub const DAY_COUNT: usize = 30;

/// Number of weekly reviews.
pub const WEEK_COUNT: usize = 4;

/// Number of scripture-checklist units.
pub const CHECKLIST_UNITS: usize = 30;

/// A day number in `1..=30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayNumber(u8);

impl DayNumber {
    /// The first day.
    pub const FIRST: DayNumber = DayNumber(1);

    /// Validate a 1-based day number.
    ///
    /// # Errors
    ///
    /// Returns [`MunjizError::InvalidUpdate`] outside `1..=30`.
    pub fn new(day: u8) -> Result<Self> {
        if (1..=DAY_COUNT as u8).contains(&day) {
            Ok(Self(day))
        } else {
            Err(MunjizError::InvalidUpdate(format!(
                "day {day} is outside 1..={DAY_COUNT}"
            )))
        }
    }

    /// 1-based value.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// 0-based index into [`AppDocument::days`].
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }

    /// The week (1..=4) this day's review belongs to; days 29-30 fold into week 4.
    #[must_use]
    pub fn week(self) -> WeekNumber {
        let week = ((self.0 - 1) / 7 + 1).min(WEEK_COUNT as u8);
        WeekNumber(week)
    }
}

impl TryFrom<u8> for DayNumber {
    type Error = MunjizError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<DayNumber> for u8 {
    fn from(value: DayNumber) -> Self {
        value.0
    }
}

impl fmt::Display for DayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A week number in `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekNumber(u8);

impl WeekNumber {
    /// Validate a 1-based week number.
    ///
    /// # Errors
    ///
    /// Returns [`MunjizError::InvalidUpdate`] outside `1..=4`.
    pub fn new(week: u8) -> Result<Self> {
        if (1..=WEEK_COUNT as u8).contains(&week) {
            Ok(Self(week))
        } else {
            Err(MunjizError::InvalidUpdate(format!(
                "week {week} is outside 1..={WEEK_COUNT}"
            )))
        }
    }

    /// 1-based value.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// 0-based index into [`AppDocument::weekly_reviews`].
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl TryFrom<u8> for WeekNumber {
    type Error = MunjizError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<WeekNumber> for u8 {
    fn from(value: WeekNumber) -> Self {
        value.0
    }
}

/// A scripture checklist unit in `1..=30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct UnitNumber(u8);

impl UnitNumber {
    /// Validate a 1-based checklist unit.
    ///
    /// # Errors
    ///
    /// Returns [`MunjizError::InvalidUpdate`] outside `1..=30`.
    pub fn new(unit: u8) -> Result<Self> {
        if (1..=CHECKLIST_UNITS as u8).contains(&unit) {
            Ok(Self(unit))
        } else {
            Err(MunjizError::InvalidUpdate(format!(
                "checklist unit {unit} is outside 1..={CHECKLIST_UNITS}"
            )))
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// 0-based index into [`AppDocument::scripture_checklist`].
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl TryFrom<u8> for UnitNumber {
    type Error = MunjizError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<UnitNumber> for u8 {
    fn from(value: UnitNumber) -> Self {
        value.0
    }
}

impl fmt::Display for UnitNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDocument {
    pub days: [DayEntry; DAY_COUNT],
    pub weekly_reviews: [WeeklyReview; WEEK_COUNT],
    pub current_day: DayNumber,
    pub scripture_checklist: [bool; CHECKLIST_UNITS],
    pub theme: AppTheme,
    pub notifications: NotificationSettings,
}

impl Default for AppDocument {
    fn default() -> Self {
        Self {
            days: std::array::from_fn(|i| DayEntry::new(DayNumber(i as u8 + 1))),
            weekly_reviews: std::array::from_fn(|i| WeeklyReview::new(WeekNumber(i as u8 + 1))),
            current_day: DayNumber::FIRST,
            scripture_checklist: [false; CHECKLIST_UNITS],
            theme: AppTheme::default(),
            notifications: NotificationSettings::default(),
        }
    }
}

/// Headline numbers for a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub current_day: DayNumber,
    /// Checklist units marked done.
    pub checklist_completed: usize,
    /// Checklist completion, rounded to the nearest percent.
    pub checklist_percent: u32,
    /// Days whose frog task is completed.
    pub high_focus_days: usize,
    /// Weekly reviews with at least one answer.
    pub reviews_started: usize,
}

impl AppDocument {
    /// Entry for `day`.
    #[must_use]
    pub fn day(&self, day: DayNumber) -> &DayEntry {
        &self.days[day.index()]
    }

    /// Review for `week`.
    #[must_use]
    pub fn review(&self, week: WeekNumber) -> &WeeklyReview {
        &self.weekly_reviews[week.index()]
    }

    /// Number of checklist units marked done.
    #[must_use]
    pub fn checklist_completed(&self) -> usize {
        self.scripture_checklist.iter().filter(|done| **done).count()
    }

    /// Compute dashboard numbers.
    #[must_use]
    pub fn summary(&self) -> ProgressSummary {
        let completed = self.checklist_completed();
        let percent = ((completed * 100) as f64 / CHECKLIST_UNITS as f64).round() as u32;
        ProgressSummary {
            current_day: self.current_day,
            checklist_completed: completed,
            checklist_percent: percent,
            high_focus_days: self
                .days
                .iter()
                .filter(|day| day.frog_task.is_completed)
                .count(),
            reviews_started: self
                .weekly_reviews
                .iter()
                .filter(|review| review.is_started())
                .count(),
        }
    }
}

reconcile_as_leaf!(DayNumber, AppTheme);

reconcile_fields!(AppDocument {
    days => "days",
    weekly_reviews => "weeklyReviews",
    current_day => "currentDay",
    scripture_checklist => "scriptureChecklist" | "quranKhatma",
    theme => "theme",
    notifications => "notifications",
});
