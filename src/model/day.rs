//! Per-day record: tasks, habits, prayers, reading progress, reflection.

use crate::model::DayNumber;
use crate::store::merge::{reconcile_as_leaf, reconcile_fields};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default pages-per-day reading goal.
pub const DEFAULT_PAGE_GOAL: u32 = 20;

/// A single task slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identifier derived from the day number and slot.
    pub id: String,
    /// Free-text description.
    pub description: String,
    /// Whether the task is done.
    pub is_completed: bool,
    /// Suggested time of day (frog task only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl Task {
    fn empty(id: String, time: Option<&str>) -> Self {
        Self {
            id,
            description: String::new(),
            is_completed: false,
            time: time.map(str::to_owned),
        }
    }
}

/// Daily remembrance habits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiritualHabits {
    pub morning_dhikr: bool,
    pub evening_dhikr: bool,
    pub dua_before_iftar: bool,
}

/// The five obligatory prayers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObligatoryPrayers {
    pub fajr: bool,
    pub dhuhr: bool,
    pub asr: bool,
    pub maghrib: bool,
    pub isha: bool,
}

/// The five recommended prayers attached to obligatory ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedPrayers {
    pub fajr_pre: bool,
    pub dhuhr_pre: bool,
    pub dhuhr_post: bool,
    pub maghrib_post: bool,
    pub isha_post: bool,
}

/// Night prayers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightPrayers {
    pub taraweeh: bool,
    pub tahajjud: bool,
}

/// Prayer checklist for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prayers {
    pub obligatory: ObligatoryPrayers,
    pub recommended: RecommendedPrayers,
    pub night: NightPrayers,
}

impl Prayers {
    /// Number of obligatory prayers marked done (0-5).
    #[must_use]
    pub fn obligatory_count(&self) -> usize {
        let o = &self.obligatory;
        [o.fajr, o.dhuhr, o.asr, o.maghrib, o.isha]
            .into_iter()
            .filter(|done| *done)
            .count()
    }

    /// Number of prayers of any kind marked done (0-12).
    #[must_use]
    pub fn completed_count(&self) -> usize {
        let r = &self.recommended;
        let n = &self.night;
        self.obligatory_count()
            + [
                r.fajr_pre,
                r.dhuhr_pre,
                r.dhuhr_post,
                r.maghrib_post,
                r.isha_post,
                n.taraweeh,
                n.tahajjud,
            ]
            .into_iter()
            .filter(|done| *done)
            .count()
    }
}

/// Pages read against the day's goal. No relation between the two is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptureProgress {
    pub goal: u32,
    pub completed: u32,
}

impl Default for ScriptureProgress {
    fn default() -> Self {
        Self {
            goal: DEFAULT_PAGE_GOAL,
            completed: 0,
        }
    }
}

impl ScriptureProgress {
    /// Completion percentage capped at 100; a zero goal counts as one page.
    #[must_use]
    pub fn percent(&self) -> u32 {
        let goal = u64::from(self.goal.max(1));
        let pct = u64::from(self.completed) * 100 / goal;
        pct.min(100) as u32
    }
}

/// Self-assessed feeling for the day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feeling {
    Excellent,
    #[default]
    Normal,
    NeedsImprovement,
}

impl Feeling {
    /// Wire-format name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Normal => "normal",
            Self::NeedsImprovement => "needs-improvement",
        }
    }
}

impl fmt::Display for Feeling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feeling {
    type Err = crate::error::MunjizError;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "excellent" => Ok(Self::Excellent),
            "normal" => Ok(Self::Normal),
            "needs-improvement" => Ok(Self::NeedsImprovement),
            _ => Err(crate::error::MunjizError::InvalidUpdate(format!(
                "unknown feeling: {s}"
            ))),
        }
    }
}

/// End-of-day reflection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    /// A verse that stood out.
    pub verse: String,
    /// An idea worth keeping.
    pub idea: String,
    /// Something to be grateful for.
    pub gratitude: String,
    pub feeling: Feeling,
    /// What to do differently tomorrow.
    pub tomorrow_different: String,
}

/// One day of the 30-day period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    /// Day number; fixed at creation.
    pub day_number: DayNumber,
    /// Display label for the date.
    pub date_label: String,
    /// The day's highest-priority task.
    pub frog_task: Task,
    /// Exactly two secondary tasks.
    pub other_tasks: [Task; 2],
    pub spiritual_habits: SpiritualHabits,
    pub prayers: Prayers,
    pub scripture_progress: ScriptureProgress,
    pub reflection: Reflection,
    /// Locked days are read-only in the UI.
    pub is_locked: bool,
}

impl DayEntry {
    /// Fresh entry for `day`.
    #[must_use]
    pub fn new(day: DayNumber) -> Self {
        let n = day.get();
        Self {
            day_number: day,
            date_label: format!("Ramadan {n}"),
            frog_task: Task::empty(format!("frog-{n}"), Some("after Fajr")),
            other_tasks: [
                Task::empty(format!("task-2-{n}"), None),
                Task::empty(format!("task-3-{n}"), None),
            ],
            spiritual_habits: SpiritualHabits::default(),
            prayers: Prayers::default(),
            scripture_progress: ScriptureProgress::default(),
            reflection: Reflection::default(),
            is_locked: false,
        }
    }
}

reconcile_as_leaf!(Feeling);

reconcile_fields!(Task {
    description => "description",
    is_completed => "isCompleted",
    time => "time",
});

reconcile_fields!(SpiritualHabits {
    morning_dhikr => "morningDhikr",
    evening_dhikr => "eveningDhikr",
    dua_before_iftar => "duaBeforeIftar",
});

reconcile_fields!(ObligatoryPrayers {
    fajr => "fajr",
    dhuhr => "dhuhr",
    asr => "asr",
    maghrib => "maghrib",
    isha => "isha",
});

reconcile_fields!(RecommendedPrayers {
    fajr_pre => "fajrPre" | "fajr_pre",
    dhuhr_pre => "dhuhrPre" | "dhuhr_pre",
    dhuhr_post => "dhuhrPost" | "dhuhr_post",
    maghrib_post => "maghribPost" | "maghrib_post",
    isha_post => "ishaPost" | "isha_post",
});

reconcile_fields!(NightPrayers {
    taraweeh => "taraweeh",
    tahajjud => "tahajjud",
});

reconcile_fields!(Prayers {
    obligatory => "obligatory",
    recommended => "recommended" | "sunnan",
    night => "night",
});

reconcile_fields!(ScriptureProgress {
    goal => "goal",
    completed => "completed",
});

reconcile_fields!(Reflection {
    verse => "verse",
    idea => "idea",
    gratitude => "gratitude",
    feeling => "feeling",
    tomorrow_different => "tomorrowDifferent",
});

reconcile_fields!(DayEntry {
    date_label => "dateLabel" | "ramadanDate",
    frog_task => "frogTask",
    other_tasks => "otherTasks",
    spiritual_habits => "spiritualHabits",
    prayers => "prayers",
    scripture_progress => "scriptureProgress" | "quranProgress",
    reflection => "reflection",
    is_locked => "isLocked",
});
