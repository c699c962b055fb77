use crate::{
    ConnectionMonitor, ConnectionState, TickOutcome, scripts,
    tests::support::{FakePage, FakeTray, MemoryConfig, context},
};

use serde_json::json;

/// WHAT: A run of disconnected readings reloads once
/// WHY: Three drops followed by recovery must not stack three reloads
#[tokio::test]
async fn given_three_drops_then_recovery_when_ticking_then_one_reload() {
    // Given: A page reporting false, false, false, true
    let page = FakePage::on_chat();
    let tray = FakeTray::default();
    let ctx = context(&page, &tray, &MemoryConfig::default());
    page.queue(
        scripts::IS_CONNECTED,
        [json!(false), json!(false), json!(false), json!(true)],
    );

    // When: Four connection ticks run
    let mut outcomes = Vec::new();
    for _ in 0..4 {
        outcomes.push(ctx.check_connection().await);
    }

    // Then: One reload of the chat URL, state ends Connected
    assert_eq!(page.loaded(), vec![ctx.options().chat_url.clone()]);
    assert_eq!(
        outcomes,
        vec![
            TickOutcome::Applied,
            TickOutcome::NoChange,
            TickOutcome::NoChange,
            TickOutcome::NoChange,
        ]
    );
    assert_eq!(ctx.cache().connection(), ConnectionState::Connected);
    assert!(!ctx.monitor().reload_in_flight());
}

/// WHAT: A fresh page load re-arms the reload
/// WHY: A reload that landed but did not reconnect may be retried
#[tokio::test]
async fn given_reload_issued_when_page_load_starts_then_next_drop_reloads() {
    // Given: A drop that already triggered a reload
    let page = FakePage::on_chat();
    let tray = FakeTray::default();
    let ctx = context(&page, &tray, &MemoryConfig::default());
    page.set_value(scripts::IS_CONNECTED, json!(false));
    ctx.check_connection().await;

    // When: The page starts loading, and the connection is still down
    ctx.on_page_load_started();
    ctx.check_connection().await;

    // Then: A second reload was issued
    assert_eq!(page.loaded().len(), 2);
    assert_eq!(ctx.monitor().reloads(), 2);
}

/// WHAT: A reload that could not be started is retried
/// WHY: The in-flight flag must not latch after a failed navigation
#[tokio::test]
async fn given_reload_failure_when_next_tick_runs_then_reload_retried() {
    // Given: A page that is down and refuses to navigate
    let page = FakePage::on_chat();
    let tray = FakeTray::default();
    let ctx = context(&page, &tray, &MemoryConfig::default());
    page.set_value(scripts::IS_CONNECTED, json!(false));
    page.fail_load(true);

    // When: A tick fails to reload, navigation recovers, another tick runs
    let failed = ctx.check_connection().await;
    page.fail_load(false);
    let retried = ctx.check_connection().await;

    // Then: The retry went through
    assert_eq!(failed, TickOutcome::Failed);
    assert_eq!(retried, TickOutcome::Applied);
    assert_eq!(page.loaded().len(), 1);
}

/// WHAT: Probe failures never trigger a reload
/// WHY: An unreadable page is not evidence of a dropped connection
#[tokio::test]
async fn given_unhealthy_page_when_ticking_then_no_reload() {
    // Given: A page whose friends app is missing
    let page = FakePage::on_chat();
    let tray = FakeTray::default();
    let ctx = context(&page, &tray, &MemoryConfig::default());
    page.set_value(scripts::HEALTH_CHECK, json!("g_FriendsUIApp missing"));
    page.set_value(scripts::IS_CONNECTED, json!(false));

    // When: Connection ticks run
    ctx.check_connection().await;
    ctx.check_connection().await;

    // Then: Nothing was loaded and the state is still Unknown
    assert!(page.loaded().is_empty());
    assert_eq!(ctx.cache().connection(), ConnectionState::Unknown);
}

/// WHAT: The monitor issues one reload per drop
/// WHY: Recovery clears the flag so the next drop is acted on
#[test]
fn given_monitor_when_drop_recover_drop_then_two_reloads() {
    // Given: A fresh monitor
    let mut monitor = ConnectionMonitor::default();

    // When: Down, down, up, down
    let readings = [false, false, true, false].map(|connected| monitor.observe(connected));

    // Then: Reloads on the first and last readings
    assert_eq!(readings, [true, false, false, true]);
    assert_eq!(monitor.reloads(), 2);
}
