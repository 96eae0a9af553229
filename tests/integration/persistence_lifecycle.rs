//! Store lifecycle over file-backed storage: fresh install, edits surviving a
//! restart, and recovery from old or damaged documents.

use crate::helpers::{open_store, temp_storage};
use munjiz::model::{AppDocument, DAY_COUNT, Feeling, ReminderConfig, WeekNumber};
use munjiz::store::{DOCUMENT_KEY, DayPatch, ReviewPatch, Storage, TaskPatch};
use munjiz::{AppTheme, DayNumber, ReminderKey, Update};

#[test]
fn fresh_install_starts_on_day_one() {
    let (storage, _dir) = temp_storage();
    let store = open_store(&storage);
    let doc = store.document();

    assert_eq!(doc.current_day.get(), 1);
    assert!(!doc.days[0].frog_task.is_completed);
    assert!(doc.scripture_checklist.iter().all(|done| !done));
    assert_eq!(doc.theme, AppTheme::Rose);
    assert!(!doc.notifications.master_enabled);
    assert!(storage.read(DOCUMENT_KEY).unwrap().is_none());
}

#[test]
fn edits_survive_restart() {
    let (storage, dir) = temp_storage();
    let mut store = open_store(&storage);
    let day = DayNumber::new(12).unwrap();

    store
        .apply(Update::day(
            day,
            DayPatch {
                frog_task: Some(TaskPatch {
                    description: Some("draft the proposal".to_owned()),
                    is_completed: Some(true),
                    time: None,
                }),
                ..DayPatch::default()
            },
        ))
        .unwrap();
    store.apply(Update::CurrentDay(day)).unwrap();
    store
        .apply(Update::Review {
            week: WeekNumber::new(2).unwrap(),
            patch: ReviewPatch {
                reduce_next_week: Some("screen time".to_owned()),
                ..ReviewPatch::default()
            },
        })
        .unwrap();

    assert!(dir.path().join("store").join("ramadan_tracker_pro_data.json").is_file());

    let reopened = open_store(&storage);
    assert_eq!(reopened.document(), store.document());
    assert_eq!(reopened.day(day).frog_task.description, "draft the proposal");
    assert_eq!(reopened.document().summary().high_focus_days, 1);
}

#[test]
fn damaged_document_falls_back_to_defaults() {
    let (storage, _dir) = temp_storage();
    storage.write(DOCUMENT_KEY, b"{\"days\": [").unwrap();
    let store = open_store(&storage);
    assert_eq!(store.document(), &AppDocument::default());
}

#[test]
fn older_document_is_completed_from_defaults() {
    let (storage, _dir) = temp_storage();
    // Written before gratitude, lock flags, theme and most reminders existed.
    let old = serde_json::json!({
        "currentDay": 3,
        "days": [
            { "dayNumber": 1, "frogTask": { "id": "frog-1", "description": "old", "isCompleted": true } },
            { "dayNumber": 2, "reflection": { "verse": "94:5", "feeling": "excellent" } }
        ],
        "scriptureChecklist": [true, false, true],
        "notifications": {
            "masterEnabled": true,
            "reminders": {
                "frogTask": { "enabled": false, "time": "08:15", "label": "Frog", "message": "Go" }
            }
        }
    });
    storage.write(DOCUMENT_KEY, old.to_string().as_bytes()).unwrap();

    let store = open_store(&storage);
    let doc = store.document();
    assert_eq!(doc.current_day.get(), 3);
    assert_eq!(doc.days.len(), DAY_COUNT);
    assert_eq!(doc.days[0].frog_task.description, "old");
    assert_eq!(doc.days[1].reflection.feeling, Feeling::Excellent);
    assert_eq!(doc.days[1].reflection.gratitude, "");
    assert!(!doc.days[1].is_locked);
    assert_eq!(doc.days[29].day_number.get(), 30);
    assert_eq!(doc.checklist_completed(), 2);
    assert_eq!(doc.theme, AppTheme::Rose);

    let reminders = &doc.notifications.reminders;
    assert_eq!(reminders.get(ReminderKey::FrogTask).time.to_string(), "08:15");
    for key in ReminderKey::ALL.into_iter().skip(1) {
        assert_eq!(reminders.get(key), &ReminderConfig::default_for(key));
    }
}
