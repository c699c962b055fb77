use crate::{
    ConfigKey, MenuAction, MenuItemId, MenuModel, PresenceState, RenderedItem, STATUS_MARKER,
    STEAM_CHAT_URL,
    tests::support::{MemoryConfig, labels},
};

fn standard_menu() -> MenuModel {
    MenuModel::standard(STEAM_CHAT_URL, &MemoryConfig::default())
}

fn status_labels(menu: &MenuModel) -> Vec<String> {
    labels(&menu.render())
        .into_iter()
        .filter(|label| {
            let bare = label.trim_start_matches(STATUS_MARKER);
            ["Online", "Away", "Invisible"].contains(&bare)
        })
        .collect()
}

/// WHAT: Decorating twice with the same presence equals decorating once
/// WHY: The active marker must never be applied twice to one label
#[test]
fn given_decorated_menu_when_decorating_again_then_labels_unchanged() {
    // Given: A menu decorated for Away
    let mut menu = standard_menu();
    assert!(menu.decorate(PresenceState::Away));
    let once = status_labels(&menu);

    // When: Decorating again with Away
    let changed = menu.decorate(PresenceState::Away);

    // Then: Nothing changed and Away carries a single marker
    assert!(!changed);
    assert_eq!(status_labels(&menu), once);
    assert_eq!(
        once,
        vec![
            "Online".to_string(),
            format!("{}Away", STATUS_MARKER),
            "Invisible".to_string()
        ]
    );
}

/// WHAT: Switching presence moves the marker
/// WHY: Exactly one status entry is active at a time
#[test]
fn given_online_menu_when_decorating_away_then_only_away_marked() {
    // Given: A menu decorated for Online
    let mut menu = standard_menu();
    menu.decorate(PresenceState::Online);

    // When: Decorating for Away
    menu.decorate(PresenceState::Away);

    // Then: Only Away is active
    assert_eq!(menu.active_status(), Some(PresenceState::Away));
    let marked: Vec<_> = status_labels(&menu)
        .into_iter()
        .filter(|label| label.starts_with(STATUS_MARKER))
        .collect();
    assert_eq!(marked, vec![format!("{}Away", STATUS_MARKER)]);
}

/// WHAT: Unmapped and unknown presences leave no entry decorated
/// WHY: Codes such as Busy have no status entry and must fall through silently
#[test]
fn given_unmapped_presence_when_decorating_then_no_entry_active() {
    // Given: A menu decorated for Online
    let mut menu = standard_menu();
    menu.decorate(PresenceState::Online);

    // When: Decorating for an unmapped code, then for Unknown
    menu.decorate(PresenceState::from_code(2));
    let after_unmapped = menu.active_status();
    menu.decorate(PresenceState::Unknown);

    // Then: Nothing is active in either case
    assert_eq!(after_unmapped, None);
    assert_eq!(menu.active_status(), None);
}

/// WHAT: Rendered ids route back to the entry's action
/// WHY: Native click events only carry the id
#[test]
fn given_rendered_menu_when_looking_up_ids_then_actions_resolve() {
    // Given: The standard menu
    let menu = standard_menu();

    // When: Resolving ids of known actions and of the disabled heading
    let away = menu.action_for(&MenuAction::SetPresence(PresenceState::Away).id());
    let toggle = menu.action_for(&MenuAction::ToggleConfig(ConfigKey::MinimizeToTray).id());
    let chat = menu.action_for(&MenuAction::LoadUrl(STEAM_CHAT_URL.to_string()).id());
    let heading = menu.action_for(&MenuItemId::new("heading:Status"));

    // Then: Actionable entries resolve, the heading does not
    assert_eq!(away, Some(MenuAction::SetPresence(PresenceState::Away)));
    assert_eq!(
        toggle,
        Some(MenuAction::ToggleConfig(ConfigKey::MinimizeToTray))
    );
    assert_eq!(chat, Some(MenuAction::LoadUrl(STEAM_CHAT_URL.to_string())));
    assert_eq!(heading, None);
}

/// WHAT: Settings toggles start from the stored config values
/// WHY: The checkbox must mirror the persisted setting
#[test]
fn given_config_when_building_menu_then_toggles_reflect_values() {
    // Given: minimize_on_close enabled, the rest disabled
    let config = MemoryConfig::with(&[(ConfigKey::MinimizeOnClose, true)]);

    // When: Building the standard menu
    let menu = MenuModel::standard(STEAM_CHAT_URL, &config);

    // Then: Each toggle mirrors its key
    assert_eq!(menu.checked(ConfigKey::MinimizeOnClose), Some(true));
    assert_eq!(menu.checked(ConfigKey::MinimizeToTray), Some(false));
    assert_eq!(menu.checked(ConfigKey::StartMinimized), Some(false));
    assert_eq!(menu.checked(ConfigKey::LaunchOnStartup), Some(false));
}

/// WHAT: set_checked updates the rendered checkbox
/// WHY: A toggled setting must show in the next menu that is attached
#[test]
fn given_unchecked_toggle_when_setting_checked_then_render_shows_checked() {
    // Given: The standard menu with minimize_to_tray off
    let mut menu = standard_menu();

    // When: Checking minimize_to_tray
    let changed = menu.set_checked(ConfigKey::MinimizeToTray, true);

    // Then: The rendered settings submenu shows it checked
    assert!(changed);
    let checked = menu.render().into_iter().find_map(|item| match item {
        RenderedItem::Submenu { label, items } if label == "Settings" => {
            items.into_iter().find_map(|item| match item {
                RenderedItem::Check { label, checked, .. } if label == "Minimize to Tray" => {
                    Some(checked)
                }
                _ => None,
            })
        }
        _ => None,
    });
    assert_eq!(checked, Some(true));
}
