//! Show, hide and toggle semantics shared by tray clicks and menu actions,
//! plus the close and minimize intercepts.

use crate::{ConfigKey, ConfigStore, CoreResult};

use tracing::{debug, instrument};

/// The main window as seen by the core.
pub trait WindowHost {
    /// Whether the window is currently shown.
    fn is_visible(&self) -> bool;

    /// Reveal the window and bring the process and window to the foreground.
    fn show(&self) -> CoreResult<()>;

    /// Hide the window, restoring it first if it is minimized.
    fn hide(&self) -> CoreResult<()>;

    /// Show or hide the platform's app affordance (the macOS dock icon).
    /// A no-op where there is none.
    fn set_dock_visible(&self, visible: bool);
}

/// Outcome of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// The close was cancelled and the window hidden.
    Hide,
    /// The application should terminate.
    Quit,
}

/// Outcome of a minimize request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimizeDecision {
    /// The minimize was cancelled and the window hidden.
    Hide,
    /// The window stays minimized.
    Allow,
}

/// Reveal and focus the window, restoring the dock icon.
#[instrument(skip(window))]
pub fn show_window(window: &impl WindowHost) -> CoreResult<()> {
    window.set_dock_visible(true);
    window.show()
}

/// Hide the window, and the dock icon when `hide_dock` is set.
#[instrument(skip(window))]
pub fn hide_window(window: &impl WindowHost, hide_dock: bool) -> CoreResult<()> {
    window.hide()?;
    if hide_dock {
        window.set_dock_visible(false);
    }
    Ok(())
}

/// Hide the window if visible, show it otherwise.
///
/// Returns whether the window is visible afterwards.
#[instrument(skip(window))]
pub fn toggle_window(window: &impl WindowHost, hide_dock: bool) -> CoreResult<bool> {
    if window.is_visible() {
        hide_window(window, hide_dock)?;
        Ok(false)
    } else {
        show_window(window)?;
        Ok(true)
    }
}

/// Handle a user close request.
#[instrument(skip(window, config))]
pub fn on_close_requested(
    window: &impl WindowHost,
    config: &impl ConfigStore,
    hide_dock: bool,
) -> CoreResult<CloseDecision> {
    if !config.get(ConfigKey::MinimizeOnClose) {
        debug!("Close requested, terminating");
        return Ok(CloseDecision::Quit);
    }

    hide_window(window, hide_dock)?;
    debug!("Close intercepted, window hidden");
    Ok(CloseDecision::Hide)
}

/// Handle a native minimize.
#[instrument(skip(window, config))]
pub fn on_minimize_requested(
    window: &impl WindowHost,
    config: &impl ConfigStore,
    hide_dock: bool,
) -> CoreResult<MinimizeDecision> {
    if !config.get(ConfigKey::MinimizeToTray) {
        return Ok(MinimizeDecision::Allow);
    }

    hide_window(window, hide_dock)?;
    debug!("Minimize intercepted, window hidden");
    Ok(MinimizeDecision::Hide)
}
