use crate::AppResult;

use std::sync::mpsc::SyncSender;

use steamchat_core::{IconVariant, RenderedItem};
use tokio::sync::oneshot;

/// Reply channel for a menu write; the core waits on it synchronously.
pub type TrayReply = SyncSender<AppResult<()>>;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns the window, the webview and `TrayManager`
/// (`TrayIcon` and `WebView` are `!Send`), so every native mutation and
/// process lifecycle event flows through this enum.
#[derive(Debug)]
pub enum UiCommand {
    /// Evaluate a script in the page and reply with its JSON-encoded result.
    EvaluateScript {
        /// Script source, already wrapped by the sender.
        script: String,
        /// Receives the raw JSON result.
        reply: oneshot::Sender<AppResult<String>>,
    },
    /// Navigate the webview.
    LoadUrl(String),
    /// Reload the current page.
    Reload,
    /// Clear cookies, storage and caches of the webview.
    ClearStorage {
        /// Receives the outcome.
        reply: oneshot::Sender<AppResult<()>>,
    },
    /// Show and focus the window.
    ShowWindow,
    /// Hide the window.
    HideWindow,
    /// Show or hide the macOS dock icon.
    SetDockVisible(bool),
    /// Swap the tray image. Failures are logged by the main thread.
    SetTrayIcon(IconVariant),
    /// Replace the tray tooltip. Failures are logged by the main thread.
    SetTooltip(String),
    /// Build a fresh native menu and attach it to the tray.
    SetMenu {
        /// Rendered menu tree.
        items: Vec<RenderedItem>,
        /// Receives the outcome.
        reply: TrayReply,
    },
    /// Remove the tray icon.
    DestroyTray,
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
