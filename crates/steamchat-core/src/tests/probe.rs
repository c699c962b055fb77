use crate::{
    PageProbe, PresenceState, STEAM_CHAT_URL, ShellError, Surface, scripts,
    tests::support::FakePage,
};

use serde_json::{Value, json};

fn probe(page: &FakePage) -> PageProbe<FakePage> {
    PageProbe::new(page.clone(), Surface::new(STEAM_CHAT_URL))
}

/// WHAT: Surface matching ignores fragments and a trailing slash only
/// WHY: Sub-pages of the chat site are not the chat surface
#[test]
fn given_chat_surface_when_matching_urls_then_only_chat_page_matches() {
    // Given: The chat surface
    let surface = Surface::new(STEAM_CHAT_URL);

    // When/Then: Variants of the chat URL match, other pages do not
    assert!(surface.matches("https://steamcommunity.com/chat"));
    assert!(surface.matches("https://steamcommunity.com/chat/"));
    assert!(surface.matches("https://steamcommunity.com/chat#friends"));
    assert!(!surface.matches("https://steamcommunity.com/chat/invite/abc"));
    assert!(!surface.matches("https://steamcommunity.com/id/gaben"));
    assert!(!surface.matches("about:blank"));
}

/// WHAT: Probes off the chat surface never reach the page
/// WHY: Probing a foreign page is meaningless and may be noisy
#[tokio::test]
async fn given_page_elsewhere_when_probing_then_fails_without_executing_script() {
    // Given: A page showing a profile
    let page = FakePage::on_chat();
    page.navigate("https://steamcommunity.com/id/gaben");

    // When: Probing persona state
    let result = probe(&page).persona_state().await;

    // Then: Surface mismatch, and no script was executed
    assert!(matches!(result, Err(ShellError::SurfaceMismatch { .. })));
    assert!(page.executed().is_empty());
}

/// WHAT: A failed health check stops the probe before the read
/// WHY: The app object graph is absent while the page loads
#[tokio::test]
async fn given_missing_app_object_when_probing_then_probe_unavailable() {
    // Given: A chat page whose friends app is not loaded yet
    let page = FakePage::on_chat();
    page.set_value(scripts::HEALTH_CHECK, json!("g_FriendsUIApp missing"));

    // When: Probing the persona name
    let result = probe(&page).persona_name().await;

    // Then: ProbeUnavailable, and only the health check ran
    let reason = match result {
        Err(ShellError::ProbeUnavailable { reason, .. }) => Some(reason),
        _ => None,
    };
    assert_eq!(reason.as_deref(), Some("g_FriendsUIApp missing"));
    assert_eq!(page.executed(), vec![scripts::HEALTH_CHECK.to_string()]);
}

/// WHAT: Navigation during the health check aborts the probe
/// WHY: The surface must be re-validated after every suspension
#[tokio::test]
async fn given_navigation_during_health_check_when_probing_then_surface_mismatch() {
    // Given: A chat page that navigates away while the health check runs
    let page = FakePage::on_chat();
    page.set_value(scripts::PERSONA_STATE, json!(1));
    page.navigate_during_next_script("https://steamcommunity.com/id/gaben");

    // When: Probing persona state
    let result = probe(&page).persona_state().await;

    // Then: Mismatch, and the read script never ran
    assert!(matches!(result, Err(ShellError::SurfaceMismatch { .. })));
    assert_eq!(page.executed_count(scripts::PERSONA_STATE), 0);
}

/// WHAT: Persona codes map to presence states
/// WHY: The menu only knows Online, Away and Invisible
#[tokio::test]
async fn given_persona_codes_when_probing_then_mapped_to_presence() {
    // Given: A chat page reporting Away, then Busy
    let page = FakePage::on_chat();
    page.queue(scripts::PERSONA_STATE, [json!(3), json!(2)]);
    let probe = probe(&page);

    // When: Probing twice
    let away = probe.persona_state().await;
    let busy = probe.persona_state().await;

    // Then: Away maps, Busy falls through to Other
    assert!(matches!(away, Ok(PresenceState::Away)));
    assert!(matches!(busy, Ok(PresenceState::Other(2))));
}

/// WHAT: Wrongly typed values are reported, not coerced
/// WHY: A changed upstream structure must not produce bogus state
#[tokio::test]
async fn given_string_persona_state_when_probing_then_unexpected_value() {
    // Given: A page returning a string persona state
    let page = FakePage::on_chat();
    page.set_value(scripts::PERSONA_STATE, json!("online"));

    // When: Probing persona state
    let result = probe(&page).persona_state().await;

    // Then: UnexpectedValue naming the probe
    assert!(matches!(
        result,
        Err(ShellError::UnexpectedValue {
            probe: "persona_state",
            ..
        })
    ));
}

/// WHAT: A missing persona name reads as empty
/// WHY: The tooltip falls back to the plain suffix before sign-in completes
#[tokio::test]
async fn given_null_persona_name_when_probing_then_empty_name() {
    // Given: A page with no persona name yet
    let page = FakePage::on_chat();
    page.set_value(scripts::PERSONA_NAME, Value::Null);

    // When: Probing the name
    let result = probe(&page).persona_name().await;

    // Then: Empty string
    assert!(matches!(result.as_deref(), Ok("")));
}

/// WHAT: Setting presence runs the command script with the persona code
/// WHY: Status menu clicks drive the page's own state setter
#[tokio::test]
async fn given_chat_page_when_setting_invisible_then_command_script_runs() {
    // Given: A healthy chat page
    let page = FakePage::on_chat();

    // When: Requesting Invisible
    let result = probe(&page)
        .set_persona_state(PresenceState::Invisible)
        .await;

    // Then: The setter ran with code 7
    assert!(result.is_ok());
    assert_eq!(page.executed_count(&scripts::set_persona_state(7)), 1);
}
