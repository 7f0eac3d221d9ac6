use std::collections::HashMap;

use serde::Deserialize;

/// Named description of a backing-service image: what to run and how to
/// tell that it is ready.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceProfile {
    pub image: String,
    pub tag: String,
    /// Logical port the service listens on inside the instance.
    pub service_port: u16,
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Log line that signals readiness, if the image emits one.
    #[serde(default)]
    pub ready_log_line: Option<String>,
}

impl ServiceProfile {
    pub fn postgres() -> Self {
        Self {
            image: "postgres".to_string(),
            tag: "16".to_string(),
            service_port: 5432,
            env: HashMap::from([
                ("POSTGRES_USER".to_string(), "postgres".to_string()),
                ("POSTGRES_PASSWORD".to_string(), "postgres".to_string()),
                ("POSTGRES_DB".to_string(), "postgres".to_string()),
            ]),
            ready_log_line: Some("database system is ready to accept connections".to_string()),
        }
    }
}
