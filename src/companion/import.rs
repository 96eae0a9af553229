//! Structured plan import.
//!
//! The payload is a JSON object `{"days": [...]}` (a bare array is also
//! accepted). Each record may carry `dayNumber`, `frogTaskDescription`,
//! `otherTasks` and `quranGoal`; anything missing or mistyped is ignored on
//! its own, and records without a valid day number are dropped.

use crate::error::{MunjizError, Result};
use crate::model::{DayNumber, ScriptureProgress};
use crate::store::{DayPatch, StateStore, TaskPatch, Update};
use serde_json::Value;
use tracing::{debug, info};

/// One day's worth of imported plan data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedDay {
    pub day: DayNumber,
    pub frog_task: Option<String>,
    /// At most two secondary task descriptions, in order.
    pub other_tasks: Vec<String>,
    pub scripture_goal: Option<u32>,
}

impl ImportedDay {
    /// Build the day patch. `progress` is the day's current reading progress;
    /// an imported goal replaces only its goal.
    fn into_update(self, progress: ScriptureProgress) -> Update {
        let mut patch = DayPatch {
            frog_task: self.frog_task.map(|description| TaskPatch {
                description: Some(description),
                ..TaskPatch::default()
            }),
            scripture_progress: self
                .scripture_goal
                .map(|goal| ScriptureProgress { goal, ..progress }),
            ..DayPatch::default()
        };
        for (slot, description) in patch.other_tasks.iter_mut().zip(self.other_tasks) {
            *slot = Some(TaskPatch {
                description: Some(description),
                ..TaskPatch::default()
            });
        }
        Update::day(self.day, patch)
    }
}

/// Parse an import payload.
///
/// # Errors
///
/// Returns [`MunjizError::Companion`] when the text is not JSON or has no
/// day list at all.
pub fn parse_import(text: &str) -> Result<Vec<ImportedDay>> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| MunjizError::Companion(format!("import payload is not JSON: {e}")))?;
    let records = match &value {
        Value::Array(records) => records,
        Value::Object(object) => object
            .get("days")
            .and_then(Value::as_array)
            .ok_or_else(|| MunjizError::Companion("import payload has no days list".to_owned()))?,
        _ => {
            return Err(MunjizError::Companion(
                "import payload must be an object or array".to_owned(),
            ));
        }
    };

    let days: Vec<ImportedDay> = records.iter().filter_map(parse_record).collect();
    debug!(records = records.len(), accepted = days.len(), "parsed import payload");
    Ok(days)
}

fn parse_record(record: &Value) -> Option<ImportedDay> {
    let day = record
        .get("dayNumber")
        .and_then(Value::as_u64)
        .and_then(|n| u8::try_from(n).ok())
        .and_then(|n| DayNumber::new(n).ok());
    let Some(day) = day else {
        debug!(?record, "skipping import record without a valid day number");
        return None;
    };

    let frog_task = record
        .get("frogTaskDescription")
        .and_then(Value::as_str)
        .map(str::to_owned);
    let other_tasks = record
        .get("otherTasks")
        .and_then(Value::as_array)
        .map(|tasks| {
            tasks
                .iter()
                .filter_map(Value::as_str)
                .take(2)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();
    let scripture_goal = record
        .get("quranGoal")
        .and_then(Value::as_u64)
        .and_then(|goal| u32::try_from(goal).ok());

    Some(ImportedDay {
        day,
        frog_task,
        other_tasks,
        scripture_goal,
    })
}

/// Merge imported days into the store with a single write.
/// Returns the number of days touched.
///
/// # Errors
///
/// Propagates [`StateStore::apply_batch`] failures.
pub fn apply_import(store: &mut StateStore, days: Vec<ImportedDay>) -> Result<usize> {
    let count = days.len();
    let updates: Vec<Update> = days
        .into_iter()
        .map(|day| {
            let progress = store.day(day.day).scripture_progress;
            day.into_update(progress)
        })
        .collect();
    store.apply_batch(updates)?;
    info!(days = count, "imported plan");
    Ok(count)
}
