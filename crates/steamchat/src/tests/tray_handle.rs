use crate::{
    AppError, UiCommand,
    ui_handle::{CommandSink, TrayHandle},
};

use std::{panic::Location, sync::mpsc, thread, time::Instant};

use error_location::ErrorLocation;
use steamchat_core::{
    CoreResult, IconVariant, PresenceState, RenderedItem, ShellError, TrayHost, TrayPlatform,
};

impl CommandSink for mpsc::Sender<UiCommand> {
    fn send_command(&self, command: UiCommand) -> CoreResult<()> {
        self.send(command).map_err(|_| ShellError::HostUnavailable {
            reason: "main thread gone".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

fn menu() -> Vec<RenderedItem> {
    vec![RenderedItem::Separator]
}

/// WHAT: Tooltip and icon writes return without waiting for the main thread
/// WHY: The runtime thread must keep ticking while the UI thread is busy
#[test]
fn given_unresponsive_main_thread_when_tooltip_and_icon_set_then_return_at_once() {
    // Given: A main thread that never drains its queue
    let (sink, queue) = mpsc::channel();
    let tray = TrayHandle::new(sink);
    let icon = IconVariant::new(PresenceState::Away, true, TrayPlatform::Other);

    // When: Writing the tooltip and the icon
    let started = Instant::now();
    let tooltip = tray.set_tooltip("Gordon - steamchat");
    let image = tray.set_icon(icon);

    // Then: Both succeed immediately and were queued in order
    assert!(tooltip.is_ok());
    assert!(image.is_ok());
    assert!(started.elapsed() < crate::ui_handle::TRAY_REPLY_TIMEOUT);
    assert!(matches!(
        queue.try_recv(),
        Ok(UiCommand::SetTooltip(text)) if text == "Gordon - steamchat"
    ));
    assert!(matches!(queue.try_recv(), Ok(UiCommand::SetTrayIcon(queued)) if queued == icon));
}

/// WHAT: A menu the main thread fails to attach surfaces as a native failure
/// WHY: The synchronizer keeps its cache and retries only when it sees the error
#[test]
fn given_failing_main_thread_when_menu_set_then_native_failure() {
    // Given: A main thread answering every menu write with an error
    let (sink, queue) = mpsc::channel();
    let tray = TrayHandle::new(sink);
    let main_thread = thread::spawn(move || {
        if let Ok(UiCommand::SetMenu { reply, .. }) = queue.recv() {
            let _ = reply.send(Err(AppError::TrayError {
                reason: "menu rejected".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }));
        }
    });

    // When: Writing a menu
    let result = tray.set_menu(menu());

    // Then: The failure comes back to the caller
    assert!(matches!(
        result,
        Err(ShellError::NativeOperation {
            operation: "set_menu",
            ..
        })
    ));
    assert!(main_thread.join().is_ok());
}

/// WHAT: A menu write succeeds once the main thread confirms it
/// WHY: Only confirmed menus are recorded by the synchronizer
#[test]
fn given_responsive_main_thread_when_menu_set_then_ok() {
    // Given: A main thread confirming menu writes
    let (sink, queue) = mpsc::channel();
    let tray = TrayHandle::new(sink);
    let main_thread = thread::spawn(move || {
        if let Ok(UiCommand::SetMenu { reply, items }) = queue.recv() {
            let _ = reply.send(Ok(()));
            return items.len();
        }
        0
    });

    // When: Writing a menu
    let result = tray.set_menu(menu());

    // Then: Success, and the whole tree reached the main thread
    assert!(result.is_ok());
    assert!(matches!(main_thread.join(), Ok(1)));
}

/// WHAT: A main thread that has exited makes every write fail fast
/// WHY: Writes after shutdown must not wait out the reply timeout
#[test]
fn given_closed_main_thread_when_menu_set_then_host_unavailable() {
    // Given: The receiving side is gone
    let (sink, queue) = mpsc::channel();
    drop(queue);
    let tray = TrayHandle::new(sink);

    // When: Writing a menu and a tooltip
    let started = Instant::now();
    let menu_result = tray.set_menu(menu());
    let tooltip_result = tray.set_tooltip("steamchat");

    // Then: Both report the host as unavailable without waiting
    assert!(matches!(menu_result, Err(ShellError::HostUnavailable { .. })));
    assert!(matches!(tooltip_result, Err(ShellError::HostUnavailable { .. })));
    assert!(started.elapsed() < crate::ui_handle::TRAY_REPLY_TIMEOUT);
}
