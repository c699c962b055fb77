use crate::PresenceState;

/// Platform family, as far as tray artwork is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrayPlatform {
    /// macOS menu bar, which wants template images at 2x.
    MacOs,
    /// Windows and Linux notification areas.
    Other,
}

impl TrayPlatform {
    /// Platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            TrayPlatform::MacOs
        } else {
            TrayPlatform::Other
        }
    }
}

/// Presence reduced to what the icon can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconBucket {
    /// Any visible presence, or unknown.
    Normal,
    /// Invisible.
    Invisible,
}

impl IconBucket {
    /// Bucket for `presence`.
    pub fn for_presence(presence: PresenceState) -> Self {
        match presence {
            PresenceState::Invisible => IconBucket::Invisible,
            _ => IconBucket::Normal,
        }
    }
}

/// Key selecting one tray image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconVariant {
    /// Presence bucket.
    pub bucket: IconBucket,
    /// Whether unread messages are waiting.
    pub unread: bool,
    /// Target platform.
    pub platform: TrayPlatform,
}

impl IconVariant {
    /// Variant for the given inputs.
    pub fn new(presence: PresenceState, unread: bool, platform: TrayPlatform) -> Self {
        Self {
            bucket: IconBucket::for_presence(presence),
            unread,
            platform,
        }
    }

    /// File name of the image under `resources/icons`.
    pub fn resource_name(&self) -> &'static str {
        use IconBucket::{Invisible, Normal};
        use TrayPlatform::{MacOs, Other};

        match (self.platform, self.bucket, self.unread) {
            (Other, Normal, false) => "tray-normal.png",
            (Other, Normal, true) => "tray-normal-unread.png",
            (Other, Invisible, false) => "tray-invisible.png",
            (Other, Invisible, true) => "tray-invisible-unread.png",
            (MacOs, Normal, false) => "mac-tray-normal@2x.png",
            (MacOs, Normal, true) => "mac-tray-normal-unread@2x.png",
            (MacOs, Invisible, false) => "mac-tray-invisible@2x.png",
            (MacOs, Invisible, true) => "mac-tray-invisible-unread@2x.png",
        }
    }
}
