//! Web notifications raised by the chat page, shown as desktop notifications.
//!
//! The page init script replaces `window.Notification` with a wrapper that
//! posts `{"kind": "notify", "title": ..., "body": ...}` over the webview IPC
//! channel. Clicking the desktop notification (where the platform reports
//! clicks) brings the window back.

use crate::{AppError, AppResult, ShellEvent};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use error_location::ErrorLocation;
use notify_rust::Notification;
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Application name shown by the notification server.
const APP_NAME: &str = "SteamChat";

/// Notifications whose clicks are watched at the same time. Each watch holds
/// a blocking thread until its notification is clicked or closed.
pub const MAX_WATCHED_NOTIFICATIONS: usize = 4;

/// Messages the page sends over the IPC channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IpcMessage {
    /// A web notification was raised.
    Notify {
        /// Notification title.
        title: String,
        /// Notification body; empty when the page gave none.
        #[serde(default)]
        body: String,
    },
}

impl IpcMessage {
    /// Parse an IPC message body.
    #[track_caller]
    pub fn parse(body: &str) -> AppResult<Self> {
        serde_json::from_str(body).map_err(|e| AppError::NotificationError {
            reason: format!("Unrecognised IPC message: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// The app event this message raises.
    pub fn into_event(self) -> ShellEvent {
        match self {
            IpcMessage::Notify { title, body } => ShellEvent::Notify { title, body },
        }
    }
}

/// Bounded pool of click watchers.
#[derive(Debug, Clone)]
pub struct WatchSlots {
    in_use: Arc<AtomicUsize>,
    limit: usize,
}

impl WatchSlots {
    /// Pool allowing `limit` concurrent watchers.
    pub fn new(limit: usize) -> Self {
        Self {
            in_use: Arc::new(AtomicUsize::new(0)),
            limit,
        }
    }

    /// Take a slot, or `None` when all are in use. The slot is returned on
    /// drop.
    #[cfg_attr(not(all(unix, not(target_os = "macos"))), allow(dead_code))]
    pub fn try_acquire(&self) -> Option<WatchSlot> {
        self.in_use
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < self.limit).then_some(n + 1)
            })
            .ok()
            .map(|_| WatchSlot {
                in_use: Arc::clone(&self.in_use),
            })
    }

    /// Slots currently taken.
    pub fn in_use(&self) -> usize {
        self.in_use.load(Ordering::SeqCst)
    }
}

/// A taken watcher slot.
#[derive(Debug)]
pub struct WatchSlot {
    in_use: Arc<AtomicUsize>,
}

impl Drop for WatchSlot {
    fn drop(&mut self) {
        self.in_use.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Shows desktop notifications and reports clicks back to the app loop.
pub struct NotificationBridge {
    events: mpsc::Sender<ShellEvent>,
    slots: WatchSlots,
}

impl NotificationBridge {
    /// Bridge reporting clicks on `events`.
    pub fn new(events: mpsc::Sender<ShellEvent>) -> Self {
        Self {
            events,
            slots: WatchSlots::new(MAX_WATCHED_NOTIFICATIONS),
        }
    }

    /// Show a desktop notification.
    #[track_caller]
    #[instrument(skip(self, body))]
    pub fn show(&self, title: &str, body: &str) -> AppResult<()> {
        let mut notification = Notification::new();
        notification
            .appname(APP_NAME)
            .summary(title)
            .body(body)
            .action("default", "Open");

        let shown = notification
            .show()
            .map_err(|e| AppError::NotificationError {
                reason: format!("Failed to show notification: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.watch_clicks(shown);
        Ok(())
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    fn watch_clicks(&self, handle: notify_rust::NotificationHandle) {
        let Some(slot) = self.slots.try_acquire() else {
            debug!(
                watched = self.slots.in_use(),
                "Too many open notifications, click not watched"
            );
            return;
        };
        let events = self.events.clone();

        // wait_for_action blocks until the notification is clicked or closed.
        tokio::task::spawn_blocking(move || {
            let _slot = slot;
            handle.wait_for_action(|action| {
                if action == "default"
                    && events
                        .blocking_send(ShellEvent::NotificationClicked)
                        .is_err()
                {
                    debug!("App loop gone, notification click dropped");
                }
            });
        });
    }

    /// Clicks are not reported on this platform.
    #[cfg(not(all(unix, not(target_os = "macos"))))]
    fn watch_clicks<H>(&self, _shown: H) {
        let _ = (&self.events, &self.slots);
    }
}
