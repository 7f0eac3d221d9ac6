use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::application::ports::ConnectOptions;
use crate::domain::ServiceProfile;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub client: ClientSettings,
    pub profiles: HashMap<String, ServiceProfile>,
}

impl Settings {
    pub fn profile(&self, name: &str) -> Option<&ServiceProfile> {
        self.profiles.get(name)
    }

    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            connect_timeout: Duration::from_secs(self.client.connect_timeout_secs),
            max_wait: Duration::from_secs(self.client.max_wait_secs),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingSettings::default(),
            client: ClientSettings::default(),
            profiles: HashMap::from([("postgres".to_string(), ServiceProfile::postgres())]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: std::env::var("HARNESS_LOG").unwrap_or_else(|_| "info".to_string()),
            enable_json: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
        }
    }
}

/// Connection timeouts in seconds. Defaults are deliberately large so a
/// cold ephemeral host has minutes, not seconds, to come up.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    pub connect_timeout_secs: u64,
    pub max_wait_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: std::env::var("HARNESS_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            max_wait_secs: std::env::var("HARNESS_MAX_WAIT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }
}
