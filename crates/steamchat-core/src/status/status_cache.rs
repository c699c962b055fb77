use crate::{IconVariant, PresenceState};

/// Last connection verdict from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Not probed yet, or the probe failed.
    #[default]
    Unknown,
    /// The page reported a live connection.
    Connected,
    /// The page reported the connection dropped.
    Disconnected,
}

/// Last-known probe results for one window.
///
/// Used to suppress redundant native calls: a value is only pushed to the
/// tray when it differs from what is cached here.
#[derive(Debug, Default)]
pub struct StatusCache {
    presence: PresenceState,
    stale: bool,
    tooltip: Option<String>,
    unread: bool,
    connection: ConnectionState,
    icon: Option<IconVariant>,
}

impl StatusCache {
    /// Last good presence value.
    pub fn presence(&self) -> PresenceState {
        self.presence
    }

    /// Whether the page has left the chat surface since the last good probe.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Whether `presence` differs from the last good value.
    pub fn presence_differs(&self, presence: PresenceState) -> bool {
        self.presence != presence
    }

    /// Record a freshly probed presence. Returns `true` when it changed.
    pub fn update_presence(&mut self, presence: PresenceState) -> bool {
        self.stale = false;
        if self.presence == presence {
            return false;
        }
        self.presence = presence;
        true
    }

    /// Flag every probe-derived value as stale without discarding it.
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    /// Tooltip currently applied to the tray.
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Whether applying `text` would change the tray.
    pub fn tooltip_differs(&self, text: &str) -> bool {
        self.tooltip.as_deref() != Some(text)
    }

    /// Remember the tooltip that was just applied.
    pub fn record_tooltip(&mut self, text: String) {
        self.tooltip = Some(text);
    }

    /// Whether the last unread probe saw unread messages.
    pub fn unread(&self) -> bool {
        self.unread
    }

    /// Record the unread flag.
    pub fn set_unread(&mut self, unread: bool) {
        self.unread = unread;
    }

    /// Last connection verdict.
    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    /// Record a connection verdict.
    pub fn set_connection(&mut self, connection: ConnectionState) {
        self.connection = connection;
    }

    /// Icon variant currently applied to the tray.
    pub fn icon(&self) -> Option<IconVariant> {
        self.icon
    }

    /// Remember the icon that was just applied.
    pub fn record_icon(&mut self, icon: IconVariant) {
        self.icon = Some(icon);
    }
}
