use crate::config::{default_chat_url, default_tooltip_suffix};

use serde::{Deserialize, Serialize};

/// The wrapped web application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Chat surface URL.
    #[serde(default = "default_chat_url")]
    pub url: String,
    /// Suffix of the tray tooltip.
    #[serde(default = "default_tooltip_suffix")]
    pub tooltip_suffix: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            url: default_chat_url(),
            tooltip_suffix: default_tooltip_suffix(),
        }
    }
}
