//! System tray icon whose image, tooltip and menu are driven by the tray
//! synchronizer.
//!
//! Native menus are rebuilt from scratch on every change; item ids come
//! from the rendered menu so clicks route back without a lookup table.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use steamchat_core::{IconVariant, PresenceState, RenderedItem, TrayPlatform};
use tracing::{debug, info, instrument};
use tray_icon::{
    Icon, TrayIcon, TrayIconBuilder,
    menu::{CheckMenuItem, IsMenuItem, Menu, MenuId, MenuItem, PredefinedMenuItem, Submenu},
};

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: Option<TrayIcon>,
}

impl TrayManager {
    /// Create the tray icon with the neutral artwork and `tooltip`.
    ///
    /// The menu is attached later by the synchronizer. A left click opens
    /// the menu only on macOS; elsewhere it toggles the window.
    #[track_caller]
    #[instrument]
    pub fn new(tooltip: &str) -> AppResult<Self> {
        let icon = Self::load_icon(IconVariant::new(
            PresenceState::Unknown,
            false,
            TrayPlatform::current(),
        ))?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(tooltip)
            .with_icon(icon)
            .with_menu(Box::new(Menu::new()))
            .with_menu_on_left_click(cfg!(target_os = "macos"))
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon: Some(tray_icon),
        })
    }

    /// Swap the tray image.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn set_icon(&mut self, variant: IconVariant) -> AppResult<()> {
        let icon = Self::load_icon(variant)?;

        self.tray()?
            .set_icon(Some(icon))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Replace the tooltip.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn set_tooltip(&mut self, text: &str) -> AppResult<()> {
        self.tray()?
            .set_tooltip(Some(text))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Build a native menu from `items` and attach it in place of the
    /// current one.
    #[track_caller]
    #[instrument(skip_all, fields(items = items.len()))]
    pub fn set_menu(&mut self, items: &[RenderedItem]) -> AppResult<()> {
        let menu = Menu::new();
        for item in items {
            let native = Self::native_item(item)?;
            menu.append(&*native)
                .map_err(|e| AppError::TrayError {
                    reason: format!("Failed to add menu item: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        self.tray()?.set_menu(Some(Box::new(menu)));
        debug!("Tray menu replaced");

        Ok(())
    }

    /// Remove the tray icon. Later writes fail with a tray error.
    pub fn destroy(&mut self) {
        if self.tray_icon.take().is_some() {
            info!("System tray icon removed");
        }
    }

    #[track_caller]
    fn tray(&self) -> AppResult<&TrayIcon> {
        self.tray_icon.as_ref().ok_or_else(|| AppError::TrayError {
            reason: "Tray icon was destroyed".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn native_item(item: &RenderedItem) -> AppResult<Box<dyn IsMenuItem>> {
        let native: Box<dyn IsMenuItem> = match item {
            RenderedItem::Item { id, label, enabled } => Box::new(MenuItem::with_id(
                MenuId::new(id.as_str()),
                label,
                *enabled,
                None,
            )),
            RenderedItem::Check { id, label, checked } => Box::new(CheckMenuItem::with_id(
                MenuId::new(id.as_str()),
                label,
                true,
                *checked,
                None,
            )),
            RenderedItem::Separator => Box::new(PredefinedMenuItem::separator()),
            RenderedItem::Submenu { label, items } => {
                let submenu = Submenu::new(label, true);
                for child in items {
                    let native = Self::native_item(child)?;
                    submenu
                        .append(&*native)
                        .map_err(|e| AppError::TrayError {
                            reason: format!("Failed to add submenu item: {}", e),
                            location: ErrorLocation::from(Location::caller()),
                        })?;
                }
                Box::new(submenu)
            }
        };

        Ok(native)
    }

    /// Load icon from compile-time embedded PNG bytes.
    #[track_caller]
    fn load_icon(variant: IconVariant) -> AppResult<Icon> {
        let png_bytes: &[u8] = match variant.resource_name() {
            "tray-normal.png" => include_bytes!("../resources/icons/tray-normal.png"),
            "tray-normal-unread.png" => include_bytes!("../resources/icons/tray-normal-unread.png"),
            "tray-invisible.png" => include_bytes!("../resources/icons/tray-invisible.png"),
            "tray-invisible-unread.png" => {
                include_bytes!("../resources/icons/tray-invisible-unread.png")
            }
            "mac-tray-normal@2x.png" => include_bytes!("../resources/icons/mac-tray-normal@2x.png"),
            "mac-tray-normal-unread@2x.png" => {
                include_bytes!("../resources/icons/mac-tray-normal-unread@2x.png")
            }
            "mac-tray-invisible@2x.png" => {
                include_bytes!("../resources/icons/mac-tray-invisible@2x.png")
            }
            "mac-tray-invisible-unread@2x.png" => {
                include_bytes!("../resources/icons/mac-tray-invisible-unread@2x.png")
            }
            other => {
                return Err(AppError::TrayError {
                    reason: format!("No embedded icon named {}", other),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let img = image::load_from_memory(png_bytes).map_err(|e| AppError::TrayError {
            reason: format!("Failed to decode embedded icon: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let rgba = img.into_rgba8();
        let (width, height) = (rgba.width(), rgba.height());

        Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
