//! Prayer-time lookup results.
//!
//! The lookup answers in free text that contains a JSON object somewhere
//! inside it. The span from the first `{` to the last `}` is parsed; keys
//! naming one of the five prayers (any case) with a valid `HH:MM` value
//! become reminder updates.

use crate::error::{MunjizError, Result};
use crate::model::{ReminderKey, ReminderTime};
use crate::store::{ReminderPatch, StateStore, Update};
use serde_json::Value;
use tracing::{debug, info};

/// Extract `(reminder, time)` pairs from a lookup response, in key order.
///
/// # Errors
///
/// Returns [`MunjizError::Companion`] when the text holds no JSON object.
pub fn parse_prayer_times(text: &str) -> Result<Vec<(ReminderKey, ReminderTime)>> {
    let object = extract_object(text)
        .ok_or_else(|| MunjizError::Companion("no prayer-time object in response".to_owned()))?;

    let mut times: Vec<(ReminderKey, ReminderTime)> = object
        .iter()
        .filter_map(|(name, value)| {
            let key = ReminderKey::for_prayer_name(name)?;
            let parsed = value.as_str().and_then(|raw| raw.parse::<ReminderTime>().ok());
            if parsed.is_none() {
                debug!(%name, ?value, "skipping invalid prayer time");
            }
            parsed.map(|time| (key, time))
        })
        .collect();
    times.sort_by_key(|(key, _)| *key);
    times.dedup_by_key(|(key, _)| *key);
    Ok(times)
}

fn extract_object(text: &str) -> Option<serde_json::Map<String, Value>> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

/// Set each prayer reminder's time and enable it, with a single write.
///
/// # Errors
///
/// Propagates [`StateStore::apply_batch`] failures.
pub fn apply_prayer_times(
    store: &mut StateStore,
    times: &[(ReminderKey, ReminderTime)],
) -> Result<usize> {
    let updates = times.iter().map(|(key, time)| Update::Reminder {
        key: *key,
        patch: ReminderPatch {
            enabled: Some(true),
            time: Some(*time),
            ..ReminderPatch::default()
        },
    });
    store.apply_batch(updates)?;
    info!(count = times.len(), "prayer times updated");
    Ok(times.len())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::store::MemoryStorage;
    use std::sync::Arc;

    #[test]
    fn parses_object_embedded_in_prose() {
        let text = "Here are today's times:\n```json\n{\"Fajr\": \"04:12\", \"dhuhr\": \"12:01\", \
                    \"ASR\": \"bad\", \"maghrib\": 1830, \"isha\": \"19:31\", \"sunrise\": \"05:40\"}\n```";
        let times = parse_prayer_times(text).unwrap();
        let rendered: Vec<_> = times
            .iter()
            .map(|(key, time)| format!("{key}={time}"))
            .collect();
        assert_eq!(
            rendered,
            vec!["prayerFajr=04:12", "prayerDhuhr=12:01", "prayerIsha=19:31"]
        );
    }

    #[test]
    fn missing_object_is_an_error() {
        assert!(parse_prayer_times("no data today").is_err());
        assert!(parse_prayer_times("} backwards {").is_err());
        assert!(parse_prayer_times("{not json}").is_err());
    }

    #[test]
    fn apply_enables_and_sets_time() {
        let mut store = StateStore::initialize(Arc::new(MemoryStorage::new()));
        let times = parse_prayer_times(r#"{"maghrib": "18:42"}"#).unwrap();
        assert_eq!(apply_prayer_times(&mut store, &times).unwrap(), 1);

        let reminders = &store.notifications().reminders;
        let maghrib = reminders.get(ReminderKey::PrayerMaghrib);
        assert!(maghrib.enabled);
        assert_eq!(maghrib.time.to_string(), "18:42");
        assert!(!reminders.get(ReminderKey::PrayerFajr).enabled);
    }
}
