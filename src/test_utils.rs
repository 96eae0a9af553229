//! Shared test utilities used across multiple test modules.

use crate::error::{MunjizError, Result};
use crate::notifier::{Notifier, PermissionState};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Notifier that records every call and answers permission requests with a
/// configurable state.
#[derive(Debug)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
    state: Mutex<PermissionState>,
    answer: Mutex<PermissionState>,
    requests: AtomicUsize,
    fail: bool,
}

impl RecordingNotifier {
    /// Permission already granted.
    pub fn granted() -> Self {
        Self::with_permission(PermissionState::Granted, PermissionState::Granted)
    }

    /// Start in `state`; a permission request resolves to `answer`.
    pub fn with_permission(state: PermissionState, answer: PermissionState) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            state: Mutex::new(state),
            answer: Mutex::new(answer),
            requests: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Every `notify` call is recorded and then fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::granted()
        }
    }

    /// Change the current state and the answer to future requests.
    pub fn set_permission(&self, state: PermissionState, answer: PermissionState) {
        *self.state.lock().expect("state lock") = state;
        *self.answer.lock().expect("answer lock") = answer;
    }

    pub fn permission_requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn titles(&self) -> Vec<String> {
        self.sent
            .lock()
            .expect("sent lock")
            .iter()
            .map(|(title, _)| title.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn permission_state(&self) -> PermissionState {
        *self.state.lock().expect("state lock")
    }

    async fn request_permission(&self) -> PermissionState {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let answer = *self.answer.lock().expect("answer lock");
        *self.state.lock().expect("state lock") = answer;
        answer
    }

    async fn notify(&self, title: &str, body: &str) -> Result<()> {
        self.sent
            .lock()
            .expect("sent lock")
            .push((title.to_owned(), body.to_owned()));
        if self.fail {
            Err(MunjizError::Notification("sink offline".to_owned()))
        } else {
            Ok(())
        }
    }
}
