use crate::{CoreResult, IconVariant, RenderedItem};

/// The native tray icon as seen by the core.
///
/// Native menus cannot be edited once attached, so [`TrayHost::set_menu`]
/// always receives the full rendered tree and must replace the old menu
/// wholesale.
///
/// Every method is synchronous and runs on the synchronizer's thread, so a
/// slow implementation stalls all of its timers. Implementations should
/// return promptly and only wait where the outcome matters, as for
/// [`TrayHost::set_menu`] whose failure the synchronizer retries.
pub trait TrayHost {
    /// Swap the tray image.
    fn set_icon(&self, icon: IconVariant) -> CoreResult<()>;

    /// Replace the hover text.
    fn set_tooltip(&self, text: &str) -> CoreResult<()>;

    /// Build a new native menu from `items` and attach it.
    fn set_menu(&self, items: Vec<RenderedItem>) -> CoreResult<()>;

    /// Remove the tray icon.
    fn destroy(&self);
}
