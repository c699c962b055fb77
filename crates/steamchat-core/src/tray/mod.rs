mod icon_variant;
mod tray_host;

pub use {
    icon_variant::{IconBucket, IconVariant, TrayPlatform},
    tray_host::TrayHost,
};
