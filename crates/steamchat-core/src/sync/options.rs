use crate::TrayPlatform;

use std::time::Duration;

/// Steam chat web application.
pub const STEAM_CHAT_URL: &str = "https://steamcommunity.com/chat";

/// Suffix of the tray tooltip, and the tooltip on its own when no name is known.
pub const TOOLTIP_SUFFIX: &str = "steamchat";

/// Shortest period a timer runs at. `tokio::time::interval` rejects zero.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Polling periods of the synchronizer timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncIntervals {
    /// Presence / status menu refresh.
    pub menu: Duration,
    /// Tooltip refresh.
    pub tooltip: Duration,
    /// Tray icon refresh.
    pub icon: Duration,
    /// Connection health check.
    pub connection: Duration,
}

impl SyncIntervals {
    /// The same periods with every zero raised to [`MIN_INTERVAL`].
    pub fn clamped(self) -> Self {
        Self {
            menu: self.menu.max(MIN_INTERVAL),
            tooltip: self.tooltip.max(MIN_INTERVAL),
            icon: self.icon.max(MIN_INTERVAL),
            connection: self.connection.max(MIN_INTERVAL),
        }
    }
}

impl Default for SyncIntervals {
    fn default() -> Self {
        Self {
            menu: Duration::from_millis(1000),
            tooltip: Duration::from_millis(10_000),
            icon: Duration::from_millis(1000),
            connection: Duration::from_millis(5000),
        }
    }
}

/// Everything a synchronizer needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// URL of the chat surface; also the reload target.
    pub chat_url: String,
    /// Tooltip suffix and fallback.
    pub tooltip_suffix: String,
    /// Timer periods.
    pub intervals: SyncIntervals,
    /// Hide the dock icon together with the window.
    pub hide_dock: bool,
    /// Platform used to pick tray artwork.
    pub platform: TrayPlatform,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            chat_url: STEAM_CHAT_URL.to_string(),
            tooltip_suffix: TOOLTIP_SUFFIX.to_string(),
            intervals: SyncIntervals::default(),
            hide_dock: true,
            platform: TrayPlatform::current(),
        }
    }
}
