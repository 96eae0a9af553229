//! Plan import and prayer-time merge against a file-backed store.

use crate::helpers::{open_store, temp_storage};
use munjiz::companion::{apply_import, apply_prayer_times, parse_import, parse_prayer_times};
use munjiz::{DayNumber, ReminderKey};

#[test]
fn imported_plan_persists() {
    let (storage, _dir) = temp_storage();
    let mut store = open_store(&storage);

    let payload = r#"{"days": [
        {"dayNumber": 1, "frogTaskDescription": "Plan the month", "otherTasks": ["Buy dates", "Call parents"], "quranGoal": 25},
        {"dayNumber": 2, "frogTaskDescription": "Clean the study"},
        {"dayNumber": 99, "frogTaskDescription": "out of range"}
    ]}"#;
    let days = parse_import(payload).unwrap();
    assert_eq!(apply_import(&mut store, days).unwrap(), 2);

    let reopened = open_store(&storage);
    let day1 = reopened.day(DayNumber::new(1).unwrap());
    assert_eq!(day1.frog_task.description, "Plan the month");
    assert_eq!(day1.other_tasks[1].description, "Call parents");
    assert_eq!(day1.scripture_progress.goal, 25);
    let day2 = reopened.day(DayNumber::new(2).unwrap());
    assert_eq!(day2.frog_task.description, "Clean the study");
    assert_eq!(day2.scripture_progress.goal, 20);
}

#[test]
fn prayer_times_enable_reminders_and_persist() {
    let (storage, _dir) = temp_storage();
    let mut store = open_store(&storage);

    let response = "Times for Istanbul today: {\"fajr\": \"05:51\", \"Dhuhr\": \"13:14\", \
                    \"asr\": \"16:38\", \"maghrib\": \"19:22\", \"isha\": \"20:41\"}";
    let times = parse_prayer_times(response).unwrap();
    assert_eq!(apply_prayer_times(&mut store, &times).unwrap(), 5);

    let reopened = open_store(&storage);
    let reminders = &reopened.notifications().reminders;
    for key in ReminderKey::ALL.into_iter().filter(|key| key.is_prayer()) {
        assert!(reminders.get(key).enabled, "{key} should be enabled");
    }
    assert_eq!(reminders.get(ReminderKey::PrayerDhuhr).time.to_string(), "13:14");
    assert!(!reopened.notifications().master_enabled);
}
