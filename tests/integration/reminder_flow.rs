//! End-to-end reminder flow: activation, master toggle, store edits and the
//! runner, with a paused tokio clock and a manual wall clock.

use crate::helpers::{at, channel_notifier, drain, open_store, temp_storage};
use munjiz::notifier::PermissionState;
use munjiz::scheduler::{ManualClock, set_master_enabled};
use munjiz::store::{ReminderPatch, Storage};
use munjiz::{ActivationGate, ReminderKey, ReminderRunner, Update};
use std::sync::Arc;
use std::time::Duration;

async fn wait(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs)).await;
}

#[tokio::test(start_paused = true)]
async fn fajr_reminder_fires_once_then_stops_on_deactivation() {
    let (storage, _dir) = temp_storage();
    let mut store = open_store(&storage);
    let gate = ActivationGate::load(Arc::clone(&storage) as Arc<dyn Storage>, "Ramadan");
    assert!(gate.activate("Ramadan").unwrap());

    store
        .apply(Update::Reminder {
            key: ReminderKey::PrayerFajr,
            patch: ReminderPatch {
                enabled: Some(true),
                label: Some("Fajr".to_owned()),
                ..ReminderPatch::default()
            },
        })
        .unwrap();

    let (notifier, mut rx) = channel_notifier(PermissionState::Granted);
    assert!(set_master_enabled(&mut store, notifier.as_ref(), true).await.unwrap());

    let clock = Arc::new(ManualClock::new(at(1, 4, 30, 0)));
    let runner = ReminderRunner::new(
        clock.clone(),
        notifier.clone(),
        store.subscribe_notifications(),
        gate.subscribe(),
    );
    let cancel = runner.cancellation_token();
    let handle = runner.spawn();

    wait(55).await;
    let sent = drain(&mut rx);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "Fajr");

    gate.deactivate().unwrap();
    clock.set(at(2, 4, 30, 0));
    wait(30).await;
    assert!(drain(&mut rx).is_empty());

    cancel.cancel();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn edited_reminder_time_is_picked_up_while_running() {
    let (storage, _dir) = temp_storage();
    let mut store = open_store(&storage);
    let gate = ActivationGate::load(Arc::clone(&storage) as Arc<dyn Storage>, "Ramadan");
    gate.activate("Ramadan").unwrap();

    let (notifier, mut rx) = channel_notifier(PermissionState::Granted);
    set_master_enabled(&mut store, notifier.as_ref(), true).await.unwrap();

    let clock = Arc::new(ManualClock::new(at(5, 21, 0, 0)));
    let runner = ReminderRunner::new(
        clock.clone(),
        notifier.clone(),
        store.subscribe_notifications(),
        gate.subscribe(),
    )
    .with_tick_interval(Duration::from_secs(5));
    let cancel = runner.cancellation_token();
    let handle = runner.spawn();

    wait(12).await;
    assert!(drain(&mut rx).is_empty());

    store
        .apply(Update::Reminder {
            key: ReminderKey::Quran,
            patch: ReminderPatch {
                time: Some("21:01".parse().unwrap()),
                message: Some("Two pages before sleep".to_owned()),
                ..ReminderPatch::default()
            },
        })
        .unwrap();
    clock.set(at(5, 21, 1, 0));
    wait(6).await;

    let sent = drain(&mut rx);
    assert_eq!(
        sent,
        vec![("Quran Reading".to_owned(), "Two pages before sleep".to_owned())]
    );

    cancel.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn denied_permission_keeps_master_off() {
    let (storage, _dir) = temp_storage();
    let mut store = open_store(&storage);
    let (notifier, _rx) = channel_notifier(PermissionState::Denied);

    assert!(!set_master_enabled(&mut store, notifier.as_ref(), true).await.unwrap());
    assert!(!open_store(&storage).notifications().master_enabled);
}

#[tokio::test(start_paused = true)]
async fn changes_written_by_another_store_reach_the_runner_after_reload() {
    let (storage, _dir) = temp_storage();
    let mut running = open_store(&storage);
    let running_gate = ActivationGate::load(Arc::clone(&storage) as Arc<dyn Storage>, "Ramadan");
    assert!(running_gate.activate("Ramadan").unwrap());

    let (notifier, mut rx) = channel_notifier(PermissionState::Granted);
    running
        .apply(Update::Reminder {
            key: ReminderKey::PrayerFajr,
            patch: ReminderPatch {
                enabled: Some(true),
                label: Some("Fajr".to_owned()),
                ..ReminderPatch::default()
            },
        })
        .unwrap();
    set_master_enabled(&mut running, notifier.as_ref(), true).await.unwrap();

    let clock = Arc::new(ManualClock::new(at(1, 4, 30, 0)));
    let runner = ReminderRunner::new(
        clock.clone(),
        notifier.clone(),
        running.subscribe_notifications(),
        running_gate.subscribe(),
    );
    let cancel = runner.cancellation_token();
    let handle = runner.spawn();

    wait(1).await;
    assert_eq!(drain(&mut rx).len(), 1);

    // A separate command process over the same storage.
    let mut other = open_store(&storage);
    let other_gate = ActivationGate::load(Arc::clone(&storage) as Arc<dyn Storage>, "Ramadan");
    other.apply(Update::MasterEnabled(false)).unwrap();
    other_gate.deactivate().unwrap();

    assert!(running.reload());
    assert!(running_gate.reload());
    clock.set(at(2, 4, 30, 0));
    wait(30).await;
    assert!(drain(&mut rx).is_empty());

    other.apply(Update::MasterEnabled(true)).unwrap();
    assert!(other_gate.activate("Ramadan").unwrap());
    assert!(running.reload());
    assert!(running_gate.reload());
    wait(1).await;
    assert_eq!(drain(&mut rx).len(), 1);

    cancel.cancel();
    handle.await.unwrap();
}
