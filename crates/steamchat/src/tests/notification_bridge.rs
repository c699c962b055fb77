use crate::{
    ShellEvent,
    notification_bridge::{IpcMessage, MAX_WATCHED_NOTIFICATIONS, WatchSlots},
};

/// WHAT: Notify messages from the page parse into app events
/// WHY: The page wrapper is the only source of desktop notifications
#[test]
#[allow(clippy::unwrap_used)]
fn given_notify_message_when_parsed_then_event_carries_title_and_body() {
    // Given: The message the page init script posts
    let body = r#"{"kind":"notify","title":"Gordon","body":"Rise and shine"}"#;

    // When: Parsing it
    let event = IpcMessage::parse(body).unwrap().into_event();

    // Then: Title and body are carried through
    assert_eq!(
        event,
        ShellEvent::Notify {
            title: "Gordon".to_string(),
            body: "Rise and shine".to_string(),
        }
    );
}

/// WHAT: A notification without a body gets an empty one
/// WHY: Pages may raise title-only notifications
#[test]
#[allow(clippy::unwrap_used)]
fn given_notify_without_body_when_parsed_then_body_empty() {
    // Given: A title-only message
    let body = r#"{"kind":"notify","title":"Alyx"}"#;

    // When: Parsing it
    let message = IpcMessage::parse(body).unwrap();

    // Then: The body defaults to empty
    assert_eq!(
        message,
        IpcMessage::Notify {
            title: "Alyx".to_string(),
            body: String::new(),
        }
    );
}

/// WHAT: Unknown or malformed messages are rejected
/// WHY: The page can post arbitrary strings over the IPC channel
#[test]
fn given_unknown_messages_when_parsed_then_error() {
    // Given: Messages that are not notifications
    let bodies = [r#"{"kind":"navigate","url":"x"}"#, "not json", r#"{"title":"x"}"#];

    // When / Then: Each is rejected
    for body in bodies {
        assert!(IpcMessage::parse(body).is_err(), "{}", body);
    }
}

/// WHAT: Click watchers are capped while notifications stay open
/// WHY: Each watcher holds a blocking thread until its notification closes
#[test]
fn given_all_slots_taken_when_acquiring_then_none_until_one_released() {
    // Given: Every watcher slot taken by notifications still on screen
    let slots = WatchSlots::new(MAX_WATCHED_NOTIFICATIONS);
    let mut taken: Vec<_> = (0..MAX_WATCHED_NOTIFICATIONS)
        .filter_map(|_| slots.try_acquire())
        .collect();
    assert_eq!(taken.len(), MAX_WATCHED_NOTIFICATIONS);

    // When: Another notification arrives
    let extra = slots.try_acquire();

    // Then: It is not watched, until an earlier notification closes
    assert!(extra.is_none());
    assert_eq!(slots.in_use(), MAX_WATCHED_NOTIFICATIONS);

    taken.pop();
    assert_eq!(slots.in_use(), MAX_WATCHED_NOTIFICATIONS - 1);
    assert!(slots.try_acquire().is_some());
}
