use crate::CoreResult;

use std::fmt;

/// Boolean settings the shell reads and toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Start with the window hidden in the tray.
    StartMinimized,
    /// Closing the window hides it instead of quitting.
    MinimizeOnClose,
    /// Minimizing the window hides it to the tray.
    MinimizeToTray,
    /// Register the application to launch at login.
    LaunchOnStartup,
}

impl ConfigKey {
    /// Every key, in settings menu order.
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::MinimizeOnClose,
        ConfigKey::MinimizeToTray,
        ConfigKey::StartMinimized,
        ConfigKey::LaunchOnStartup,
    ];

    /// Key name as stored in the config file.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::StartMinimized => "start_minimized",
            ConfigKey::MinimizeOnClose => "minimize_on_close",
            ConfigKey::MinimizeToTray => "minimize_to_tray",
            ConfigKey::LaunchOnStartup => "launch_on_startup",
        }
    }

    /// Label shown for the key in the settings submenu.
    pub fn label(self) -> &'static str {
        match self {
            ConfigKey::StartMinimized => "Start Minimized",
            ConfigKey::MinimizeOnClose => "Minimize on Close",
            ConfigKey::MinimizeToTray => "Minimize to Tray",
            ConfigKey::LaunchOnStartup => "Launch on Startup",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Externally owned key/value store for the boolean settings.
///
/// The core reads it to decorate toggle entries and to gate close and
/// minimize behaviour. Persistence is the implementor's concern.
pub trait ConfigStore {
    /// Current value of `key`.
    fn get(&self, key: ConfigKey) -> bool;

    /// Store a new value for `key`.
    fn set(&mut self, key: ConfigKey, value: bool) -> CoreResult<()>;
}
