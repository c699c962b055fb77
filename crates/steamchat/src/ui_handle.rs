//! Core-side handles onto the native objects owned by the main thread.
//!
//! [`UiHandle`] and [`TrayHandle`] implement the steamchat-core host traits
//! by sending [`UiCommand`]s through the `tao` event loop proxy. Script
//! results and storage clears come back on `oneshot` channels.
//!
//! Icon and tooltip writes are fire-and-forget: the main thread logs their
//! failures. Only menu writes wait for an answer, since the synchronizer
//! retries a menu that failed to attach. That wait blocks the runtime
//! thread, and every timer on it, for at most [`TRAY_REPLY_TIMEOUT`].

use crate::UiCommand;

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, RecvTimeoutError},
    },
    time::Duration,
};

use error_location::ErrorLocation;
use serde_json::Value;
use steamchat_core::{
    CoreResult, IconVariant, PageHost, RenderedItem, ShellError, TrayHost, WindowHost,
};
use tao::event_loop::EventLoopProxy;
use tokio::sync::{oneshot, watch};
use tracing::{debug, warn};

/// How long a menu write may wait for the main thread.
pub const TRAY_REPLY_TIMEOUT: Duration = Duration::from_secs(2);

/// Where commands for the main thread go.
pub trait CommandSink {
    /// Queue `command` for the main thread.
    fn send_command(&self, command: UiCommand) -> CoreResult<()>;
}

impl CommandSink for EventLoopProxy<UiCommand> {
    fn send_command(&self, command: UiCommand) -> CoreResult<()> {
        self.send_event(command).map_err(|_| host_unavailable("event loop closed"))
    }
}

/// The page and window, as seen from the async runtime.
#[derive(Clone)]
pub struct UiHandle {
    proxy: EventLoopProxy<UiCommand>,
    url: watch::Receiver<String>,
    visible: Arc<AtomicBool>,
}

impl UiHandle {
    /// Handle sending through `proxy`. `url` tracks the page's current
    /// address; `visible` is shared with the window owner.
    pub fn new(
        proxy: EventLoopProxy<UiCommand>,
        url: watch::Receiver<String>,
        visible: Arc<AtomicBool>,
    ) -> Self {
        Self {
            proxy,
            url,
            visible,
        }
    }

    fn send(&self, command: UiCommand) -> CoreResult<()> {
        self.proxy.send_command(command)
    }
}

impl PageHost for UiHandle {
    fn current_url(&self) -> String {
        self.url.borrow().clone()
    }

    async fn execute_script(&self, script: &str) -> CoreResult<Value> {
        let (reply, response) = oneshot::channel();
        self.send(UiCommand::EvaluateScript {
            script: wrap_script(script),
            reply,
        })?;

        let raw = response
            .await
            .map_err(|_| host_unavailable("script reply dropped"))?
            .map_err(|e| ShellError::ScriptFailed {
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        decode_reply(&raw)
    }

    fn load_url(&self, url: &str) -> CoreResult<()> {
        self.send(UiCommand::LoadUrl(url.to_string()))
    }

    fn reload(&self) -> CoreResult<()> {
        self.send(UiCommand::Reload)
    }

    async fn clear_storage(&self) -> CoreResult<()> {
        let (reply, response) = oneshot::channel();
        self.send(UiCommand::ClearStorage { reply })?;

        response
            .await
            .map_err(|_| host_unavailable("clear storage reply dropped"))?
            .map_err(|e| native_failure("clear_storage", e.to_string()))
    }
}

impl WindowHost for UiHandle {
    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn show(&self) -> CoreResult<()> {
        self.send(UiCommand::ShowWindow)?;
        self.visible.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn hide(&self) -> CoreResult<()> {
        self.send(UiCommand::HideWindow)?;
        self.visible.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn set_dock_visible(&self, visible: bool) {
        if let Err(e) = self.send(UiCommand::SetDockVisible(visible)) {
            debug!(visible, error = ?e, "Dock visibility change dropped");
        }
    }
}

/// The tray icon, as seen from the async runtime.
#[derive(Clone)]
pub struct TrayHandle<S = EventLoopProxy<UiCommand>> {
    sink: S,
}

impl<S: CommandSink> TrayHandle<S> {
    /// Handle sending through `sink`.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: CommandSink> TrayHost for TrayHandle<S> {
    fn set_icon(&self, icon: IconVariant) -> CoreResult<()> {
        self.sink.send_command(UiCommand::SetTrayIcon(icon))
    }

    fn set_tooltip(&self, text: &str) -> CoreResult<()> {
        self.sink.send_command(UiCommand::SetTooltip(text.to_string()))
    }

    fn set_menu(&self, items: Vec<RenderedItem>) -> CoreResult<()> {
        let (reply, response) = mpsc::sync_channel(1);
        self.sink.send_command(UiCommand::SetMenu { items, reply })?;

        match response.recv_timeout(TRAY_REPLY_TIMEOUT) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(native_failure("set_menu", e.to_string())),
            Err(RecvTimeoutError::Timeout) => Err(host_unavailable("tray did not answer in time")),
            Err(RecvTimeoutError::Disconnected) => Err(host_unavailable("tray reply dropped")),
        }
    }

    fn destroy(&self) {
        if let Err(e) = self.sink.send_command(UiCommand::DestroyTray) {
            warn!(error = ?e, "Tray already gone");
        }
    }
}

/// Wrap `script` so that its value, or whatever it throws, comes back as a
/// JSON envelope `{"ok": value}` / `{"err": message}`.
pub fn wrap_script(script: &str) -> String {
    format!(
        "(function () {{ try {{ return JSON.stringify({{ ok: ({}) }}); }} \
         catch (e) {{ return JSON.stringify({{ err: String(e) }}); }} }})()",
        script
    )
}

/// Decode the raw evaluation result of a [`wrap_script`] script.
///
/// Webviews hand back the JSON encoding of the returned string, so the
/// envelope is usually encoded twice. An absent `ok` means the script
/// evaluated to `undefined`.
#[track_caller]
pub fn decode_reply(raw: &str) -> CoreResult<Value> {
    let mut value: Value = serde_json::from_str(raw).map_err(|e| ShellError::ScriptFailed {
        reason: format!("Malformed script reply: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    if let Value::String(inner) = &value {
        value = serde_json::from_str(inner).map_err(|e| ShellError::ScriptFailed {
            reason: format!("Malformed script envelope: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
    }

    let Value::Object(mut envelope) = value else {
        return Err(ShellError::ScriptFailed {
            reason: format!("Script reply is not an envelope: {}", value),
            location: ErrorLocation::from(Location::caller()),
        });
    };

    if let Some(err) = envelope.remove("err") {
        let reason = match err {
            Value::String(message) => message,
            other => other.to_string(),
        };
        return Err(ShellError::ScriptFailed {
            reason,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(envelope.remove("ok").unwrap_or(Value::Null))
}

#[track_caller]
fn host_unavailable(reason: &str) -> ShellError {
    ShellError::HostUnavailable {
        reason: reason.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn native_failure(operation: &'static str, reason: String) -> ShellError {
    ShellError::NativeOperation {
        operation,
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}
