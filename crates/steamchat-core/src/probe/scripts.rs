//! Scripts evaluated against the Steam friends UI.
//!
//! Every read is a bare expression; the host wraps it so a throw becomes an
//! error value instead of an exception.

/// Structural health check of `g_FriendsUIApp`.
///
/// Evaluates to `true`, or to a string naming the first missing piece.
pub const HEALTH_CHECK: &str = r#"(function () {
  if (!window.g_FriendsUIApp) return 'g_FriendsUIApp missing';
  if (!window.g_FriendsUIApp.FriendStore) return 'FriendStore missing';
  if (!window.g_FriendsUIApp.m_UserStore) return 'UserStore missing';
  if (!window.g_FriendsUIApp.m_CMInterface) return 'CMInterface missing';
  return true;
})()"#;

/// Current persona state code.
pub const PERSONA_STATE: &str = "g_FriendsUIApp.FriendStore.m_eUserPersonaState";

/// Signed-in persona name.
pub const PERSONA_NAME: &str = "g_FriendsUIApp.m_UserStore.m_CMInterface.persona_name";

/// Whether the CM connection is up.
pub const IS_CONNECTED: &str = "g_FriendsUIApp.m_CMInterface.m_bConnected";

/// Unread message count, read from the `(N)` prefix the chat puts in the title.
pub const UNREAD_COUNT: &str = r#"(function () {
  const match = /^\((\d+)\)/.exec(document.title);
  return match ? parseInt(match[1], 10) : 0;
})()"#;

/// Command switching the persona state to `code`.
pub fn set_persona_state(code: i64) -> String {
    format!("g_FriendsUIApp.FriendStore.SetUserPersonaState({})", code)
}
