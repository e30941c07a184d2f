use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration of the notification surface.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationsConfig {
    /// How long every notification stays visible before it is removed
    /// automatically, in milliseconds.
    pub dismiss_after_ms: u64,
}

impl NotificationsConfig {
    /// Auto-removal delay as a [`Duration`].
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: 5000,
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Configuration for the notification surface.
    #[serde(default)]
    pub notifications: NotificationsConfig,
}
