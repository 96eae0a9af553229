//! Companion text service.
//!
//! The companion is an external generative service: it writes short advice,
//! breaks the frog task into steps, converts free-form plans into day
//! records and looks up prayer times. This crate only consumes it through
//! [`Companion`]. Failures never touch the document; text capabilities fall
//! back to fixed messages and data capabilities return one error.

pub mod import;
pub mod prayer_times;

use crate::error::Result;
use crate::model::{DayNumber, Feeling, ReminderKey};
use crate::store::StateStore;
use async_trait::async_trait;
use tracing::warn;

pub use import::{ImportedDay, apply_import, parse_import};
pub use prayer_times::{apply_prayer_times, parse_prayer_times};

/// Shown when advice cannot be generated.
pub const FALLBACK_ADVICE: &str =
    "May your time and effort be blessed. Keep striving for what is better!";

/// Shown when the frog task cannot be broken down.
pub const FALLBACK_FROG_PLAN: &str =
    "Start the first step right now, seek help from God, and do not scatter yourself.";

#[async_trait]
pub trait Companion: Send + Sync {
    /// One or two sentences of encouragement for `day` given `feeling`.
    async fn advice(&self, day: DayNumber, feeling: Feeling) -> Result<String>;

    /// Three practical first steps for the frog task.
    async fn plan_frog_task(&self, description: &str) -> Result<String>;

    /// Convert a free-form plan, optionally with an image of it (e.g. a
    /// screenshot), into the JSON import payload.
    async fn convert_plan(&self, source: &str, image: Option<&[u8]>) -> Result<String>;

    /// Prayer times for `location`, as text containing a JSON object.
    async fn prayer_times(&self, location: &str) -> Result<String>;
}

/// Advice text, or [`FALLBACK_ADVICE`] on failure.
pub async fn advice_or_fallback(
    companion: &dyn Companion,
    day: DayNumber,
    feeling: Feeling,
) -> String {
    match companion.advice(day, feeling).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => FALLBACK_ADVICE.to_owned(),
        Err(e) => {
            warn!(%day, %feeling, "advice unavailable: {e}");
            FALLBACK_ADVICE.to_owned()
        }
    }
}

/// Frog-task steps, or [`FALLBACK_FROG_PLAN`] on failure.
pub async fn frog_plan_or_fallback(companion: &dyn Companion, description: &str) -> String {
    match companion.plan_frog_task(description).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => FALLBACK_FROG_PLAN.to_owned(),
        Err(e) => {
            warn!("frog plan unavailable: {e}");
            FALLBACK_FROG_PLAN.to_owned()
        }
    }
}

/// Ask the companion to convert `source` (and `image`, when given) and merge
/// the result. Returns the number of days touched.
///
/// # Errors
///
/// Returns the companion's error, a parse error, or a storage error. The
/// document is unchanged unless the final write is what failed.
pub async fn import_plan(
    companion: &dyn Companion,
    store: &mut StateStore,
    source: &str,
    image: Option<&[u8]>,
) -> Result<usize> {
    let payload = companion.convert_plan(source, image).await?;
    let days = parse_import(&payload)?;
    apply_import(store, days)
}

/// Look up prayer times for `location` and apply them to the prayer reminders.
///
/// # Errors
///
/// Same as [`import_plan`].
pub async fn sync_prayer_times(
    companion: &dyn Companion,
    store: &mut StateStore,
    location: &str,
) -> Result<Vec<ReminderKey>> {
    let text = companion.prayer_times(location).await?;
    let times = parse_prayer_times(&text)?;
    apply_prayer_times(store, &times)?;
    Ok(times.into_iter().map(|(key, _)| key).collect())
}
