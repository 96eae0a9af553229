//! Reminder background loop.
//!
//! Spawns a tokio task that watches the notification settings and the
//! activation gate, feeds them to a [`ReminderEngine`], and polls the clock
//! on a fixed interval while armed. No timer exists while idle.

use crate::model::NotificationSettings;
use crate::notifier::Notifier;
use crate::scheduler::clock::Clock;
use crate::scheduler::engine::{Firing, Gates, ReminderEngine, SchedulerState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default interval between clock checks while armed.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(10);

/// Drives the reminder engine from a timer.
pub struct ReminderRunner {
    engine: ReminderEngine,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    settings_rx: watch::Receiver<NotificationSettings>,
    auth_rx: watch::Receiver<bool>,
    tick_interval: Duration,
    cancel: CancellationToken,
    master_seen: bool,
}

impl ReminderRunner {
    /// Create a runner. It does nothing until [`ReminderRunner::spawn`].
    pub fn new(
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        settings_rx: watch::Receiver<NotificationSettings>,
        auth_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            engine: ReminderEngine::new(),
            clock,
            notifier,
            settings_rx,
            auth_rx,
            tick_interval: DEFAULT_TICK_INTERVAL,
            cancel: CancellationToken::new(),
            master_seen: false,
        }
    }

    /// Override the poll interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Use `token` to stop the loop instead of the runner's own token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that stops the loop when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Start the background loop.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        info!(interval = ?self.tick_interval, "reminder runner started");
        self.refresh_gates().await;
        let mut ticker: Option<Interval> = None;

        loop {
            match self.engine.state() {
                SchedulerState::Armed if ticker.is_none() => {
                    let mut interval = tokio::time::interval(self.tick_interval);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                    ticker = Some(interval);
                }
                SchedulerState::Idle if ticker.is_some() => {
                    debug!("dropping reminder timer");
                    ticker = None;
                }
                _ => {}
            }

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                changed = self.settings_rx.changed() => {
                    if changed.is_err() {
                        info!("notification settings closed");
                        break;
                    }
                    self.refresh_gates().await;
                }
                changed = self.auth_rx.changed() => {
                    if changed.is_err() {
                        info!("activation gate closed");
                        break;
                    }
                    self.refresh_gates().await;
                }
                _ = next_tick(&mut ticker) => self.on_tick(),
            }
        }
        info!("reminder runner stopped");
    }

    /// Re-read every gate. Permission is requested each time the master gate
    /// turns on without it, including at startup.
    async fn refresh_gates(&mut self) {
        let master_enabled = self.settings_rx.borrow_and_update().master_enabled;
        let authorized = *self.auth_rx.borrow_and_update();
        let mut permission = self.notifier.permission_state();
        if master_enabled && !self.master_seen && !permission.is_granted() {
            debug!(?permission, "master gate on, requesting notification permission");
            permission = self.notifier.request_permission().await;
        }
        self.master_seen = master_enabled;
        self.engine.update_gates(Gates {
            master_enabled,
            authorized,
            permission,
        });
    }

    fn on_tick(&mut self) {
        let now = self.clock.now();
        let firings = {
            let settings = self.settings_rx.borrow();
            self.engine.tick(now, &settings)
        };
        for firing in firings {
            self.dispatch(firing);
        }
    }

    fn dispatch(&self, firing: Firing) {
        info!(key = %firing.key, title = %firing.title, "reminder due");
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&firing.title, &firing.body).await {
                warn!(key = %firing.key, "reminder notification failed: {e}");
            }
        });
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
