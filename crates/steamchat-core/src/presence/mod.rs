use std::fmt;

/// Steam persona state codes as used by the friends UI.
pub struct PersonaCode;

impl PersonaCode {
    /// Signed out.
    pub const OFFLINE: i64 = 0;
    /// Available.
    pub const ONLINE: i64 = 1;
    /// Do not disturb. Not offered in the menu.
    pub const BUSY: i64 = 2;
    /// Away.
    pub const AWAY: i64 = 3;
    /// Snooze. Not offered in the menu.
    pub const SNOOZE: i64 = 4;
    /// Looking to trade. Not offered in the menu.
    pub const LOOKING_TO_TRADE: i64 = 5;
    /// Looking to play. Not offered in the menu.
    pub const LOOKING_TO_PLAY: i64 = 6;
    /// Signed in but shown as offline.
    pub const INVISIBLE: i64 = 7;
}

/// The remote service's notion of the user's availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresenceState {
    /// Never observed, or observed only while the page was elsewhere.
    #[default]
    Unknown,
    /// Online.
    Online,
    /// Away.
    Away,
    /// Invisible.
    Invisible,
    /// Any other upstream code; never matches a status entry.
    Other(i64),
}

impl PresenceState {
    /// Map an upstream persona code.
    pub fn from_code(code: i64) -> Self {
        match code {
            PersonaCode::ONLINE => PresenceState::Online,
            PersonaCode::AWAY => PresenceState::Away,
            PersonaCode::INVISIBLE => PresenceState::Invisible,
            other => PresenceState::Other(other),
        }
    }

    /// Upstream persona code, `None` for [`PresenceState::Unknown`].
    pub fn code(self) -> Option<i64> {
        match self {
            PresenceState::Unknown => None,
            PresenceState::Online => Some(PersonaCode::ONLINE),
            PresenceState::Away => Some(PersonaCode::AWAY),
            PresenceState::Invisible => Some(PersonaCode::INVISIBLE),
            PresenceState::Other(code) => Some(code),
        }
    }

    /// Menu label for states that have a status entry.
    pub fn label(self) -> Option<&'static str> {
        match self {
            PresenceState::Online => Some("Online"),
            PresenceState::Away => Some("Away"),
            PresenceState::Invisible => Some("Invisible"),
            PresenceState::Unknown | PresenceState::Other(_) => None,
        }
    }
}

impl fmt::Display for PresenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.label(), self) {
            (Some(label), _) => f.write_str(label),
            (None, PresenceState::Other(code)) => write!(f, "Other({})", code),
            (None, _) => f.write_str("Unknown"),
        }
    }
}
