use steamchat_core::MenuItemId;

/// Events forwarded from the UI thread and native callbacks to the app loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// A tray menu item was clicked.
    MenuClicked(MenuItemId),
    /// The tray icon itself was left-clicked.
    TrayClicked,
    /// The user asked to close the window; the close is held until the app
    /// decides.
    CloseRequested,
    /// The window was minimized.
    MinimizeRequested,
    /// The webview started loading a page.
    PageLoadStarted,
    /// The page raised a web notification.
    Notify {
        /// Notification title.
        title: String,
        /// Notification body.
        body: String,
    },
    /// A native notification was clicked.
    NotificationClicked,
    /// The window is gone; tear everything down.
    WindowDestroyed,
}
