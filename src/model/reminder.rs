//! Reminder keys, times, and the notification settings sub-tree.

use crate::error::{MunjizError, Result};
use crate::store::merge::{reconcile_as_leaf, reconcile_fields};
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the nine fixed reminder identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReminderKey {
    /// The day's highest-priority task.
    FrogTask,
    /// Morning remembrance.
    MorningDhikr,
    /// Evening remembrance.
    EveningDhikr,
    /// Daily scripture reading.
    Quran,
    /// Dawn prayer.
    PrayerFajr,
    /// Noon prayer.
    PrayerDhuhr,
    /// Afternoon prayer.
    PrayerAsr,
    /// Sunset prayer.
    PrayerMaghrib,
    /// Night prayer.
    PrayerIsha,
}

impl ReminderKey {
    /// All keys in evaluation order.
    pub const ALL: [ReminderKey; 9] = [
        ReminderKey::FrogTask,
        ReminderKey::MorningDhikr,
        ReminderKey::EveningDhikr,
        ReminderKey::Quran,
        ReminderKey::PrayerFajr,
        ReminderKey::PrayerDhuhr,
        ReminderKey::PrayerAsr,
        ReminderKey::PrayerMaghrib,
        ReminderKey::PrayerIsha,
    ];

    /// Canonical camelCase name used in persisted data.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FrogTask => "frogTask",
            Self::MorningDhikr => "morningDhikr",
            Self::EveningDhikr => "eveningDhikr",
            Self::Quran => "quran",
            Self::PrayerFajr => "prayerFajr",
            Self::PrayerDhuhr => "prayerDhuhr",
            Self::PrayerAsr => "prayerAsr",
            Self::PrayerMaghrib => "prayerMaghrib",
            Self::PrayerIsha => "prayerIsha",
        }
    }

    /// Returns `true` for the five prayer reminders.
    #[must_use]
    pub fn is_prayer(self) -> bool {
        matches!(
            self,
            Self::PrayerFajr
                | Self::PrayerDhuhr
                | Self::PrayerAsr
                | Self::PrayerMaghrib
                | Self::PrayerIsha
        )
    }

    /// Map a bare prayer name (`"fajr"`, `"Isha"`, ...) to its reminder key.
    #[must_use]
    pub fn for_prayer_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fajr" => Some(Self::PrayerFajr),
            "dhuhr" => Some(Self::PrayerDhuhr),
            "asr" => Some(Self::PrayerAsr),
            "maghrib" => Some(Self::PrayerMaghrib),
            "isha" => Some(Self::PrayerIsha),
            _ => None,
        }
    }
}

impl fmt::Display for ReminderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderKey {
    type Err = MunjizError;

    /// Accepts the camelCase name, its snake_case spelling, or a bare prayer
    /// name, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().to_ascii_lowercase() == folded)
            .or_else(|| Self::for_prayer_name(&folded))
            .ok_or_else(|| MunjizError::InvalidUpdate(format!("unknown reminder key: {s}")))
    }
}

/// A validated 24-hour wall-clock minute, rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime {
    hour: u8,
    minute: u8,
}

impl ReminderTime {
    /// Build from hour (0-23) and minute (0-59).
    ///
    /// # Errors
    ///
    /// Returns [`MunjizError::InvalidTime`] when either component is out of range.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(MunjizError::InvalidTime(format!("{hour}:{minute}")));
        }
        Ok(Self { hour, minute })
    }

    /// Truncate any wall-clock time to its minute.
    #[must_use]
    pub fn from_timelike<T: Timelike>(time: &T) -> Self {
        // chrono guarantees hour < 24 and minute < 60.
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    /// Hour component.
    #[must_use]
    pub fn hour(self) -> u8 {
        self.hour
    }

    /// Minute component.
    #[must_use]
    pub fn minute(self) -> u8 {
        self.minute
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ReminderTime {
    type Err = MunjizError;

    /// Parses `HH:MM` (a single-digit hour is accepted and normalised).
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MunjizError::InvalidTime(s.to_owned());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str, min_len: usize| {
            (min_len..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(hour, 1) || !digits(minute, 2) {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = MunjizError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ReminderTime> for String {
    fn from(value: ReminderTime) -> Self {
        value.to_string()
    }
}

/// Configuration of one reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderConfig {
    /// Whether this reminder may fire.
    pub enabled: bool,
    /// Minute of day at which it fires.
    pub time: ReminderTime,
    /// Notification title.
    pub label: String,
    /// Notification body.
    pub message: String,
}

impl ReminderConfig {
    fn preset(enabled: bool, hour: u8, minute: u8, label: &str, message: &str) -> Self {
        Self {
            enabled,
            time: ReminderTime { hour, minute },
            label: label.to_owned(),
            message: message.to_owned(),
        }
    }

    /// Default configuration for `key`.
    #[must_use]
    pub fn default_for(key: ReminderKey) -> Self {
        match key {
            ReminderKey::FrogTask => Self::preset(
                true,
                9,
                0,
                "Frog Task",
                "Time to get today's most important task done!",
            ),
            ReminderKey::MorningDhikr => Self::preset(
                true,
                6,
                0,
                "Morning Dhikr",
                "Don't forget the morning remembrance to start your day with blessing.",
            ),
            ReminderKey::EveningDhikr => Self::preset(
                true,
                17,
                30,
                "Evening Dhikr",
                "Time for the evening remembrance and dua before iftar.",
            ),
            ReminderKey::Quran => Self::preset(
                true,
                14,
                0,
                "Quran Reading",
                "Set aside some time now for your daily portion.",
            ),
            ReminderKey::PrayerFajr => Self::preset(
                false,
                4,
                30,
                "Fajr Prayer",
                "Prayer is better than sleep. It is time for Fajr.",
            ),
            ReminderKey::PrayerDhuhr => Self::preset(
                false,
                12,
                15,
                "Dhuhr Prayer",
                "It is time for Dhuhr. Renew your energy in prayer.",
            ),
            ReminderKey::PrayerAsr => Self::preset(
                false,
                15,
                45,
                "Asr Prayer",
                "Guard the prayers, and the middle prayer. It is time for Asr.",
            ),
            ReminderKey::PrayerMaghrib => Self::preset(
                false,
                18,
                15,
                "Maghrib Prayer",
                "Enjoy your iftar. It is time for Maghrib.",
            ),
            ReminderKey::PrayerIsha => Self::preset(
                false,
                19,
                45,
                "Isha Prayer",
                "It is time for Isha and Taraweeh.",
            ),
        }
    }
}

/// The closed set of reminders, one field per [`ReminderKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub frog_task: ReminderConfig,
    pub morning_dhikr: ReminderConfig,
    pub evening_dhikr: ReminderConfig,
    pub quran: ReminderConfig,
    pub prayer_fajr: ReminderConfig,
    pub prayer_dhuhr: ReminderConfig,
    pub prayer_asr: ReminderConfig,
    pub prayer_maghrib: ReminderConfig,
    pub prayer_isha: ReminderConfig,
}

impl Default for Reminders {
    fn default() -> Self {
        Self {
            frog_task: ReminderConfig::default_for(ReminderKey::FrogTask),
            morning_dhikr: ReminderConfig::default_for(ReminderKey::MorningDhikr),
            evening_dhikr: ReminderConfig::default_for(ReminderKey::EveningDhikr),
            quran: ReminderConfig::default_for(ReminderKey::Quran),
            prayer_fajr: ReminderConfig::default_for(ReminderKey::PrayerFajr),
            prayer_dhuhr: ReminderConfig::default_for(ReminderKey::PrayerDhuhr),
            prayer_asr: ReminderConfig::default_for(ReminderKey::PrayerAsr),
            prayer_maghrib: ReminderConfig::default_for(ReminderKey::PrayerMaghrib),
            prayer_isha: ReminderConfig::default_for(ReminderKey::PrayerIsha),
        }
    }
}

impl Reminders {
    /// Reminder configuration for `key`.
    #[must_use]
    pub fn get(&self, key: ReminderKey) -> &ReminderConfig {
        match key {
            ReminderKey::FrogTask => &self.frog_task,
            ReminderKey::MorningDhikr => &self.morning_dhikr,
            ReminderKey::EveningDhikr => &self.evening_dhikr,
            ReminderKey::Quran => &self.quran,
            ReminderKey::PrayerFajr => &self.prayer_fajr,
            ReminderKey::PrayerDhuhr => &self.prayer_dhuhr,
            ReminderKey::PrayerAsr => &self.prayer_asr,
            ReminderKey::PrayerMaghrib => &self.prayer_maghrib,
            ReminderKey::PrayerIsha => &self.prayer_isha,
        }
    }

    /// Mutable reminder configuration for `key`.
    pub fn get_mut(&mut self, key: ReminderKey) -> &mut ReminderConfig {
        match key {
            ReminderKey::FrogTask => &mut self.frog_task,
            ReminderKey::MorningDhikr => &mut self.morning_dhikr,
            ReminderKey::EveningDhikr => &mut self.evening_dhikr,
            ReminderKey::Quran => &mut self.quran,
            ReminderKey::PrayerFajr => &mut self.prayer_fajr,
            ReminderKey::PrayerDhuhr => &mut self.prayer_dhuhr,
            ReminderKey::PrayerAsr => &mut self.prayer_asr,
            ReminderKey::PrayerMaghrib => &mut self.prayer_maghrib,
            ReminderKey::PrayerIsha => &mut self.prayer_isha,
        }
    }

    /// Iterate every reminder in [`ReminderKey::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ReminderKey, &ReminderConfig)> {
        ReminderKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

/// Notification sub-tree of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Gate that must be on for any reminder to fire.
    pub master_enabled: bool,
    /// Per-key reminder configuration.
    pub reminders: Reminders,
}

reconcile_as_leaf!(ReminderTime);

reconcile_fields!(ReminderConfig {
    enabled => "enabled",
    time => "time",
    label => "label",
    message => "message",
});

reconcile_fields!(Reminders {
    frog_task => "frogTask",
    morning_dhikr => "morningDhikr",
    evening_dhikr => "eveningDhikr",
    quran => "quran",
    prayer_fajr => "prayerFajr",
    prayer_dhuhr => "prayerDhuhr",
    prayer_asr => "prayerAsr",
    prayer_maghrib => "prayerMaghrib",
    prayer_isha => "prayerIsha",
});

reconcile_fields!(NotificationSettings {
    master_enabled => "masterEnabled",
    reminders => "reminders",
});
