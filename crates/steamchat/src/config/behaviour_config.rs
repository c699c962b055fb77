use crate::config::{
    default_hide_dock_when_hidden, default_launch_on_startup, default_minimize_on_close,
    default_minimize_to_tray, default_start_minimized,
};

use serde::{Deserialize, Serialize};

/// Window and process behaviour toggled from the tray's Settings submenu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Keep the window hidden at launch.
    #[serde(default = "default_start_minimized")]
    pub start_minimized: bool,
    /// Closing the window hides it instead of quitting.
    #[serde(default = "default_minimize_on_close")]
    pub minimize_on_close: bool,
    /// Minimizing the window hides it to the tray.
    #[serde(default = "default_minimize_to_tray")]
    pub minimize_to_tray: bool,
    /// Register the shell to start with the session.
    #[serde(default = "default_launch_on_startup")]
    pub launch_on_startup: bool,
    /// Hide the macOS dock icon while the window is hidden.
    #[serde(default = "default_hide_dock_when_hidden")]
    pub hide_dock_when_hidden: bool,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            start_minimized: default_start_minimized(),
            minimize_on_close: default_minimize_on_close(),
            minimize_to_tray: default_minimize_to_tray(),
            launch_on_startup: default_launch_on_startup(),
            hide_dock_when_hidden: default_hide_dock_when_hidden(),
        }
    }
}
