//! The main window and the webview showing the Steam chat.
//!
//! Lives on the main thread for the whole process. Native events are turned
//! into [`ShellEvent`]s for the app loop; [`UiCommand`]s coming back are
//! applied here.

use crate::{
    AppError, AppResult, ShellEvent, UiCommand,
    config::Config,
    link_policy::{self, LinkTarget},
    notification_bridge::IpcMessage,
};

use std::{
    cell::Cell,
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use error_location::ErrorLocation;
use tao::{
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{EventLoop, EventLoopProxy, EventLoopWindowTarget},
    window::{Window, WindowBuilder, WindowId},
};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, instrument, trace, warn};
use wry::{PageLoadEvent, WebView, WebViewBuilder};

/// Window title.
const WINDOW_TITLE: &str = "SteamChat";

/// Initial window size, in logical pixels.
const WINDOW_SIZE: (f64, f64) = (800.0, 600.0);

/// Injected into every page before its own scripts run.
const PAGE_INIT_SCRIPT: &str = include_str!("../resources/scripts/page_init.js");

/// Stands for the configured chat URL in [`PAGE_INIT_SCRIPT`].
const CHAT_URL_PLACEHOLDER: &str = "__CHAT_URL__";

/// The page initialization script with `chat_url` as the logo link target.
pub fn page_init_script(chat_url: &str) -> String {
    let literal = serde_json::Value::String(chat_url.to_string()).to_string();
    PAGE_INIT_SCRIPT.replace(CHAT_URL_PLACEHOLDER, &literal)
}

/// The chat window and its webview.
pub struct ChatWindow {
    window: Window,
    webview: WebView,
    url: Arc<watch::Sender<String>>,
    visible: Arc<AtomicBool>,
    minimized: Cell<bool>,
}

/// Publish `current` as the page address. Returns whether it changed.
///
/// Page-load events miss in-page navigation through `history.pushState`,
/// so the address is also refreshed from the webview before each script.
pub fn publish_url(url: &watch::Sender<String>, current: String) -> bool {
    url.send_if_modified(|published| {
        if *published == current {
            return false;
        }
        *published = current;
        true
    })
}

impl ChatWindow {
    /// Create the window and load the chat.
    ///
    /// `events` receives IPC notifications and page-load starts; `url` is
    /// kept at the address of the page being displayed.
    #[track_caller]
    #[instrument(skip_all)]
    pub fn build(
        event_loop: &EventLoop<UiCommand>,
        config: &Config,
        proxy: EventLoopProxy<UiCommand>,
        events: mpsc::Sender<ShellEvent>,
        url: watch::Sender<String>,
    ) -> AppResult<Self> {
        let start_visible = !config.behaviour.start_minimized;

        let window = WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1))
            .with_visible(start_visible)
            .build(event_loop)
            .map_err(|e| AppError::WindowError {
                reason: format!("Failed to create window: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let ipc_events = events.clone();
        let load_events = events;
        let url = Arc::new(url);
        let load_url = Arc::clone(&url);

        let init_script = page_init_script(&config.chat.url);

        let builder = WebViewBuilder::new()
            .with_url(config.chat.url.as_str())
            .with_initialization_script(&init_script)
            .with_devtools(cfg!(debug_assertions))
            .with_ipc_handler(move |request| {
                let message = match IpcMessage::parse(request.body()) {
                    Ok(message) => message,
                    Err(e) => {
                        debug!(error = ?e, "Ignoring IPC message");
                        return;
                    }
                };
                if let Err(e) = ipc_events.try_send(message.into_event()) {
                    warn!(error = ?e, "Dropped IPC message");
                }
            })
            .with_on_page_load_handler(move |event, page_url| match event {
                PageLoadEvent::Started => {
                    trace!(url = %page_url, "Page load started");
                    publish_url(&load_url, page_url);
                    if let Err(e) = load_events.try_send(ShellEvent::PageLoadStarted) {
                        debug!(error = ?e, "Dropped page load event");
                    }
                }
                PageLoadEvent::Finished => {
                    trace!(url = %page_url, "Page load finished");
                    publish_url(&load_url, page_url);
                }
            })
            .with_new_window_req_handler(move |target_url| {
                match LinkTarget::classify(&target_url) {
                    LinkTarget::Internal => {
                        if let Err(e) = proxy.send_event(UiCommand::LoadUrl(target_url)) {
                            warn!(error = ?e, "Failed to redirect new window request");
                        }
                    }
                    LinkTarget::External => link_policy::open_external(&target_url),
                }
                false
            });

        #[cfg(target_os = "linux")]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;

            let vbox = window.default_vbox().ok_or_else(|| AppError::WindowError {
                reason: "Window has no GTK container".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;
            builder.build_gtk(vbox)?
        };

        #[cfg(not(target_os = "linux"))]
        let webview = builder.build(&window)?;

        info!(url = %config.chat.url, start_visible, "Chat window created");

        Ok(Self {
            window,
            webview,
            url,
            visible: Arc::new(AtomicBool::new(start_visible)),
            minimized: Cell::new(false),
        })
    }

    /// Native id of the window.
    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// Visibility flag shared with the core's window handle.
    pub fn visibility(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.visible)
    }

    /// Translate a native window event into an app event.
    pub fn shell_event(&self, event: &WindowEvent) -> Option<ShellEvent> {
        match event {
            WindowEvent::CloseRequested => Some(ShellEvent::CloseRequested),
            WindowEvent::Destroyed => Some(ShellEvent::WindowDestroyed),
            WindowEvent::Resized(_) => {
                let minimized = self.window.is_minimized();
                let entered = minimized && !self.minimized.get();
                self.minimized.set(minimized);
                entered.then_some(ShellEvent::MinimizeRequested)
            }
            _ => None,
        }
    }

    /// Evaluate `script` and reply with the JSON encoding of its result.
    pub fn evaluate(&self, script: &str, reply: oneshot::Sender<AppResult<String>>) {
        match self.webview.url() {
            Ok(current) => {
                if publish_url(&self.url, current) {
                    trace!(url = %self.url.borrow().as_str(), "Page address changed in place");
                }
            }
            Err(e) => debug!(error = ?e, "Could not read the page address"),
        }

        // The callback is `Fn`; the reply is consumed by whichever side
        // answers first.
        let slot = Arc::new(Mutex::new(Some(reply)));
        let callback_slot = Arc::clone(&slot);

        let result = self
            .webview
            .evaluate_script_with_callback(script, move |raw| {
                if let Some(reply) = callback_slot.lock().ok().and_then(|mut slot| slot.take()) {
                    let _ = reply.send(Ok(raw));
                }
            });

        if let Err(e) = result {
            if let Some(reply) = slot.lock().ok().and_then(|mut slot| slot.take()) {
                let _ = reply.send(Err(AppError::from(e)));
            }
        }
    }

    /// Navigate to `url`.
    pub fn load_url(&self, url: &str) -> AppResult<()> {
        Ok(self.webview.load_url(url)?)
    }

    /// Reload the current page.
    pub fn reload(&self) -> AppResult<()> {
        Ok(self.webview.reload()?)
    }

    /// Clear cookies, storage and caches.
    pub fn clear_storage(&self) -> AppResult<()> {
        Ok(self.webview.clear_all_browsing_data()?)
    }

    /// Show, restore and focus the window.
    pub fn show(&self) {
        self.window.set_visible(true);
        if self.window.is_minimized() {
            self.window.set_minimized(false);
        }
        self.window.set_focus();
        self.visible.store(true, Ordering::SeqCst);
    }

    /// Hide the window, restoring it first so it reappears unminimized.
    pub fn hide(&self) {
        if self.window.is_minimized() {
            self.window.set_minimized(false);
            self.minimized.set(false);
        }
        self.window.set_visible(false);
        self.visible.store(false, Ordering::SeqCst);
    }

    /// Show or hide the dock icon. Only macOS has one.
    #[allow(unused_variables)]
    pub fn set_dock_visible(&self, target: &EventLoopWindowTarget<UiCommand>, visible: bool) {
        #[cfg(target_os = "macos")]
        {
            use tao::platform::macos::{ActivationPolicy, EventLoopWindowTargetExtMacOS};

            let policy = if visible {
                ActivationPolicy::Regular
            } else {
                ActivationPolicy::Accessory
            };
            target.set_activation_policy_at_runtime(policy);
        }
    }
}
