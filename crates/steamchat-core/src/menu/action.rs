use crate::{ConfigKey, PresenceState};

use std::fmt;

/// Stable identifier routing a native click back to a menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MenuItemId(String);

impl MenuItemId {
    /// Wrap a raw id, e.g. one received from a native menu event.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MenuItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What activating a menu entry does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Show the window if hidden, hide it otherwise.
    ToggleWindow,
    /// Navigate the page to a URL.
    LoadUrl(String),
    /// Clear browsing data, then reload.
    ClearStorage,
    /// Ask the page to switch persona state.
    SetPresence(PresenceState),
    /// Flip a boolean setting.
    ToggleConfig(ConfigKey),
    /// Tear down and exit.
    Quit,
}

impl MenuAction {
    /// Id of the native item bound to this action.
    pub fn id(&self) -> MenuItemId {
        let raw = match self {
            MenuAction::ToggleWindow => "toggle-window".to_string(),
            MenuAction::LoadUrl(url) => format!("load-url:{}", url),
            MenuAction::ClearStorage => "clear-storage".to_string(),
            MenuAction::SetPresence(presence) => match presence.code() {
                Some(code) => format!("presence:{}", code),
                None => "presence:unknown".to_string(),
            },
            MenuAction::ToggleConfig(key) => format!("config:{}", key),
            MenuAction::Quit => "quit".to_string(),
        };
        MenuItemId(raw)
    }
}
