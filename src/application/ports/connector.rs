use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ServiceEndpoint;

use super::{ConnectionError, ServiceClient};

/// Timeouts for establishing and using a connection. Defaults are
/// generous to absorb ephemeral-host cold start.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub connect_timeout: Duration,
    pub max_wait: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(300),
            max_wait: Duration::from_secs(300),
        }
    }
}

#[async_trait]
pub trait ClientConnector: Send + Sync {
    async fn connect(
        &self,
        endpoint: &ServiceEndpoint,
        options: &ConnectOptions,
    ) -> Result<Arc<dyn ServiceClient>, ConnectionError>;
}
