use crate::config::{
    default_connection_interval_ms, default_icon_interval_ms, default_menu_interval_ms,
    default_tooltip_interval_ms,
};

use std::time::Duration;

use serde::{Deserialize, Serialize};
use steamchat_core::SyncIntervals;

/// Timer periods, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Presence menu refresh.
    #[serde(default = "default_menu_interval_ms")]
    pub menu_interval_ms: u64,
    /// Tooltip refresh.
    #[serde(default = "default_tooltip_interval_ms")]
    pub tooltip_interval_ms: u64,
    /// Tray icon refresh.
    #[serde(default = "default_icon_interval_ms")]
    pub icon_interval_ms: u64,
    /// Connection health check.
    #[serde(default = "default_connection_interval_ms")]
    pub connection_interval_ms: u64,
}

impl PollingConfig {
    /// Periods for the synchronizer timers, zero raised to the shortest
    /// period a timer accepts.
    pub fn intervals(&self) -> SyncIntervals {
        SyncIntervals {
            menu: Duration::from_millis(self.menu_interval_ms),
            tooltip: Duration::from_millis(self.tooltip_interval_ms),
            icon: Duration::from_millis(self.icon_interval_ms),
            connection: Duration::from_millis(self.connection_interval_ms),
        }
        .clamped()
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            menu_interval_ms: default_menu_interval_ms(),
            tooltip_interval_ms: default_tooltip_interval_ms(),
            icon_interval_ms: default_icon_interval_ms(),
            connection_interval_ms: default_connection_interval_ms(),
        }
    }
}
