mod notification_bridge;
mod tray_handle;
