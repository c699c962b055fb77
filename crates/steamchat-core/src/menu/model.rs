//! The tray menu as a value.
//!
//! Native tray menus are immutable once attached, so the model is never
//! mirrored into a live native object. Every mutation ends with
//! [`MenuModel::render`], whose output the tray host turns into a brand new
//! native menu.

use crate::{ConfigKey, ConfigStore, MenuAction, MenuEntry, MenuItemId, PresenceState};

/// Prefix marking the active status entry.
pub const STATUS_MARKER: &str = "\u{2022} ";

/// Platform-neutral menu tree handed to [`TrayHost::set_menu`](crate::TrayHost::set_menu).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedItem {
    /// Clickable (or disabled) text item.
    Item {
        /// Routing id.
        id: MenuItemId,
        /// Final display text.
        label: String,
        /// Whether the item can be clicked.
        enabled: bool,
    },
    /// Checkbox item.
    Check {
        /// Routing id.
        id: MenuItemId,
        /// Display text.
        label: String,
        /// Check state.
        checked: bool,
    },
    /// Horizontal rule.
    Separator,
    /// Nested menu.
    Submenu {
        /// Display text.
        label: String,
        /// Children.
        items: Vec<RenderedItem>,
    },
}

/// Ordered list of menu entries for one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModel {
    entries: Vec<MenuEntry>,
}

impl MenuModel {
    /// The shell's tray menu: window toggle, debug and settings submenus,
    /// status selection and quit.
    pub fn standard(chat_url: &str, config: &impl ConfigStore) -> Self {
        let debug = vec![
            MenuEntry::action("Return to Chat", MenuAction::LoadUrl(chat_url.to_string())),
            MenuEntry::action("Clear Local Storage", MenuAction::ClearStorage),
        ];

        let settings = ConfigKey::ALL
            .into_iter()
            .map(|key| MenuEntry::toggle(key, config))
            .collect();

        let mut entries = vec![
            MenuEntry::action("Toggle Window", MenuAction::ToggleWindow),
            MenuEntry::Separator,
            MenuEntry::submenu("Debug", debug),
            MenuEntry::submenu("Settings", settings),
            MenuEntry::Separator,
            MenuEntry::heading("Status"),
        ];
        entries.extend(
            [
                PresenceState::Online,
                PresenceState::Away,
                PresenceState::Invisible,
            ]
            .into_iter()
            .filter_map(MenuEntry::status),
        );
        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::action("Quit", MenuAction::Quit));

        Self { entries }
    }

    /// Top-level entries.
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Mark the status entries bound to `presence` as active and all others
    /// inactive. Unknown or unmapped presences leave nothing active.
    ///
    /// Idempotent. Returns `true` if any entry changed.
    pub fn decorate(&mut self, presence: PresenceState) -> bool {
        let mut changed = false;
        visit_mut(&mut self.entries, &mut |entry| {
            if let MenuEntry::StatusIndicator {
                presence: bound,
                active,
                ..
            } = entry
            {
                let now_active = presence != PresenceState::Unknown && *bound == presence;
                if *active != now_active {
                    *active = now_active;
                    changed = true;
                }
            }
        });
        changed
    }

    /// Presence of the active status entry.
    pub fn active_status(&self) -> Option<PresenceState> {
        find(&self.entries, &|entry| match entry {
            MenuEntry::StatusIndicator {
                presence,
                active: true,
                ..
            } => Some(*presence),
            _ => None,
        })
    }

    /// Set the check state of every toggle bound to `key`.
    ///
    /// Returns `true` if any entry changed.
    pub fn set_checked(&mut self, key: ConfigKey, checked: bool) -> bool {
        let mut changed = false;
        visit_mut(&mut self.entries, &mut |entry| {
            match entry {
                MenuEntry::Toggle {
                    key: bound,
                    checked: current,
                    ..
                } if *bound == key && *current != checked => {
                    *current = checked;
                    changed = true;
                }
                _ => {}
            }
        });
        changed
    }

    /// Check state of the toggle bound to `key`.
    pub fn checked(&self, key: ConfigKey) -> Option<bool> {
        find(&self.entries, &|entry| match entry {
            MenuEntry::Toggle {
                key: bound,
                checked,
                ..
            } if *bound == key => Some(*checked),
            _ => None,
        })
    }

    /// Action behind the entry rendered with `id`.
    pub fn action_for(&self, id: &MenuItemId) -> Option<MenuAction> {
        find(&self.entries, &|entry| {
            entry
                .click_action()
                .filter(|action| action.id() == *id)
        })
    }

    /// Render the model. Pure; the active marker exists only in the output.
    pub fn render(&self) -> Vec<RenderedItem> {
        render_entries(&self.entries)
    }
}

fn render_entries(entries: &[MenuEntry]) -> Vec<RenderedItem> {
    entries.iter().map(render_entry).collect()
}

fn render_entry(entry: &MenuEntry) -> RenderedItem {
    match entry {
        MenuEntry::Action { label, action } => RenderedItem::Item {
            id: action.id(),
            label: label.clone(),
            enabled: true,
        },
        MenuEntry::Toggle {
            label,
            key,
            checked,
        } => RenderedItem::Check {
            id: MenuAction::ToggleConfig(*key).id(),
            label: label.clone(),
            checked: *checked,
        },
        MenuEntry::Separator => RenderedItem::Separator,
        MenuEntry::Submenu { label, entries } => RenderedItem::Submenu {
            label: label.clone(),
            items: render_entries(entries),
        },
        MenuEntry::StatusIndicator {
            label,
            presence,
            active,
        } => RenderedItem::Item {
            id: MenuAction::SetPresence(*presence).id(),
            label: if *active {
                format!("{}{}", STATUS_MARKER, label)
            } else {
                label.clone()
            },
            enabled: true,
        },
        MenuEntry::Heading { label } => RenderedItem::Item {
            id: MenuItemId::new(format!("heading:{}", label)),
            label: label.clone(),
            enabled: false,
        },
    }
}

fn visit_mut(entries: &mut [MenuEntry], f: &mut impl FnMut(&mut MenuEntry)) {
    for entry in entries.iter_mut() {
        if let MenuEntry::Submenu { entries, .. } = entry {
            visit_mut(entries, f);
        } else {
            f(entry);
        }
    }
}

fn find<T>(entries: &[MenuEntry], f: &impl Fn(&MenuEntry) -> Option<T>) -> Option<T> {
    entries.iter().find_map(|entry| match entry {
        MenuEntry::Submenu { entries, .. } => find(entries, f),
        other => f(other),
    })
}
