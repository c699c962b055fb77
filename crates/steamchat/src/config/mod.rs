mod behaviour_config;
mod chat_config;
#[allow(clippy::module_inception)]
mod config;
mod polling_config;

pub(crate) use {
    behaviour_config::BehaviourConfig, chat_config::ChatConfig, config::Config,
    polling_config::PollingConfig,
};

use steamchat_core::{STEAM_CHAT_URL, TOOLTIP_SUFFIX};

pub(crate) const DEFAULT_START_MINIMIZED: bool = false;
pub(crate) const DEFAULT_MINIMIZE_ON_CLOSE: bool = true;
pub(crate) const DEFAULT_MINIMIZE_TO_TRAY: bool = false;
pub(crate) const DEFAULT_LAUNCH_ON_STARTUP: bool = false;
pub(crate) const DEFAULT_HIDE_DOCK_WHEN_HIDDEN: bool = true;

pub(crate) const DEFAULT_MENU_INTERVAL_MS: u64 = 1000;
pub(crate) const DEFAULT_TOOLTIP_INTERVAL_MS: u64 = 10_000;
pub(crate) const DEFAULT_ICON_INTERVAL_MS: u64 = 1000;
pub(crate) const DEFAULT_CONNECTION_INTERVAL_MS: u64 = 5000;

pub(crate) fn default_start_minimized() -> bool {
    DEFAULT_START_MINIMIZED
}

pub(crate) fn default_minimize_on_close() -> bool {
    DEFAULT_MINIMIZE_ON_CLOSE
}

pub(crate) fn default_minimize_to_tray() -> bool {
    DEFAULT_MINIMIZE_TO_TRAY
}

pub(crate) fn default_launch_on_startup() -> bool {
    DEFAULT_LAUNCH_ON_STARTUP
}

pub(crate) fn default_hide_dock_when_hidden() -> bool {
    DEFAULT_HIDE_DOCK_WHEN_HIDDEN
}

pub(crate) fn default_chat_url() -> String {
    STEAM_CHAT_URL.to_string()
}

pub(crate) fn default_tooltip_suffix() -> String {
    TOOLTIP_SUFFIX.to_string()
}

pub(crate) fn default_menu_interval_ms() -> u64 {
    DEFAULT_MENU_INTERVAL_MS
}

pub(crate) fn default_tooltip_interval_ms() -> u64 {
    DEFAULT_TOOLTIP_INTERVAL_MS
}

pub(crate) fn default_icon_interval_ms() -> u64 {
    DEFAULT_ICON_INTERVAL_MS
}

pub(crate) fn default_connection_interval_ms() -> u64 {
    DEFAULT_CONNECTION_INTERVAL_MS
}
