//! Shared helpers for integration tests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use munjiz::notifier::{Notifier, PermissionState};
use munjiz::store::{FileStorage, Storage};
use munjiz::{Result, StateStore};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Notifier that forwards every notification over a channel.
pub(crate) struct ChannelNotifier {
    tx: mpsc::UnboundedSender<(String, String)>,
    permission: PermissionState,
}

#[async_trait]
impl Notifier for ChannelNotifier {
    fn permission_state(&self) -> PermissionState {
        self.permission
    }

    async fn request_permission(&self) -> PermissionState {
        self.permission
    }

    async fn notify(&self, title: &str, body: &str) -> Result<()> {
        let _ = self.tx.send((title.to_owned(), body.to_owned()));
        Ok(())
    }
}

/// Build a notifier with the given permission plus the receiving end.
pub(crate) fn channel_notifier(
    permission: PermissionState,
) -> (Arc<ChannelNotifier>, mpsc::UnboundedReceiver<(String, String)>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Arc::new(ChannelNotifier { tx, permission }), rx)
}

/// File-backed storage in a fresh temp directory.
/// Returns `(storage, tempdir)`; keep the tempdir alive for the test.
pub(crate) fn temp_storage() -> (Arc<FileStorage>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let storage = Arc::new(FileStorage::new(dir.path().join("store")));
    (storage, dir)
}

/// Open a store over `storage`.
pub(crate) fn open_store(storage: &Arc<FileStorage>) -> StateStore {
    StateStore::initialize(Arc::clone(storage) as Arc<dyn Storage>)
}

/// Local wall time on a fixed March 2026 date.
pub(crate) fn at(day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .expect("valid date")
        .and_hms_opt(hour, minute, second)
        .expect("valid time")
}

/// Drain everything currently queued on `rx`.
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<(String, String)>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    while let Ok(item) = rx.try_recv() {
        out.push(item);
    }
    out
}
