use crate::{ConfigKey, ConfigStore, MenuAction, PresenceState};

/// One entry of the tray menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// Plain clickable item.
    Action {
        /// Display text.
        label: String,
        /// What clicking does.
        action: MenuAction,
    },
    /// Checkbox bound to a config key.
    Toggle {
        /// Display text.
        label: String,
        /// Bound setting.
        key: ConfigKey,
        /// Mirrors the stored value.
        checked: bool,
    },
    /// Horizontal rule.
    Separator,
    /// Nested menu.
    Submenu {
        /// Display text.
        label: String,
        /// Child entries.
        entries: Vec<MenuEntry>,
    },
    /// Selectable presence; the active one is marked when rendered.
    StatusIndicator {
        /// Display text, without marker.
        label: String,
        /// Presence this entry selects.
        presence: PresenceState,
        /// Whether this is the current presence.
        active: bool,
    },
    /// Disabled caption.
    Heading {
        /// Display text.
        label: String,
    },
}

impl MenuEntry {
    /// Clickable item running `action`.
    pub fn action(label: impl Into<String>, action: MenuAction) -> Self {
        MenuEntry::Action {
            label: label.into(),
            action,
        }
    }

    /// Checkbox for `key`, checked from the store's current value.
    pub fn toggle(key: ConfigKey, config: &impl ConfigStore) -> Self {
        MenuEntry::Toggle {
            label: key.label().to_string(),
            key,
            checked: config.get(key),
        }
    }

    /// Status entry for a presence that has a label.
    pub fn status(presence: PresenceState) -> Option<Self> {
        presence.label().map(|label| MenuEntry::StatusIndicator {
            label: label.to_string(),
            presence,
            active: false,
        })
    }

    /// Nested menu.
    pub fn submenu(label: impl Into<String>, entries: Vec<MenuEntry>) -> Self {
        MenuEntry::Submenu {
            label: label.into(),
            entries,
        }
    }

    /// Disabled caption.
    pub fn heading(label: impl Into<String>) -> Self {
        MenuEntry::Heading {
            label: label.into(),
        }
    }

    /// The action clicking this entry performs, if any.
    pub fn click_action(&self) -> Option<MenuAction> {
        match self {
            MenuEntry::Action { action, .. } => Some(action.clone()),
            MenuEntry::Toggle { key, .. } => Some(MenuAction::ToggleConfig(*key)),
            MenuEntry::StatusIndicator { presence, .. } => {
                Some(MenuAction::SetPresence(*presence))
            }
            MenuEntry::Separator | MenuEntry::Submenu { .. } | MenuEntry::Heading { .. } => None,
        }
    }
}
