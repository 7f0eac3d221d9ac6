use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{info, instrument, warn};

use crate::application::ports::{
    ClientConnector, ConnectOptions, OperationError, ProvisionedHost, Provisioner,
    ProvisioningError, ServiceClient,
};
use crate::config::Settings;
use crate::domain::{InstanceId, LeaseState, ServiceEndpoint, ServiceProfile};

use super::HarnessError;

/// Acquires an isolated service instance per test case and releases it
/// unconditionally afterwards.
pub struct Harness {
    provisioner: Arc<dyn Provisioner>,
    connector: Arc<dyn ClientConnector>,
    profiles: HashMap<String, ServiceProfile>,
    options: ConnectOptions,
}

impl Harness {
    pub fn new(
        provisioner: Arc<dyn Provisioner>,
        connector: Arc<dyn ClientConnector>,
        profiles: HashMap<String, ServiceProfile>,
    ) -> Self {
        Self {
            provisioner,
            connector,
            profiles,
            options: ConnectOptions::default(),
        }
    }

    pub fn from_settings(
        provisioner: Arc<dyn Provisioner>,
        connector: Arc<dyn ClientConnector>,
        settings: &Settings,
    ) -> Self {
        Self::new(provisioner, connector, settings.profiles.clone())
            .with_options(settings.connect_options())
    }

    pub fn with_options(mut self, options: ConnectOptions) -> Self {
        self.options = options;
        self
    }

    /// Provisions a fresh instance for the named profile and connects a
    /// client to it. A failure after the instance was provisioned releases
    /// the instance before the error is returned, so a failed setup never
    /// leaks a host or leaves a connection open.
    #[instrument(skip(self))]
    pub async fn acquire(&self, profile_name: &str) -> Result<ServiceLease, HarnessError> {
        let profile = self
            .profiles
            .get(profile_name)
            .ok_or_else(|| ProvisioningError::UnknownProfile(profile_name.to_string()))?;

        let id = InstanceId::new();
        info!(
            instance = %id,
            profile = %profile_name,
            state = %LeaseState::Provisioning,
            "provisioning service instance"
        );

        let host = self.provisioner.provision(profile).await?;

        let port = match host.mapped_port(profile.service_port).await {
            Ok(port) => port,
            Err(e) => {
                Self::release_host(host, id).await;
                return Err(e.into());
            }
        };
        let endpoint = ServiceEndpoint::new(host.host_name(), port);

        let client = match self.connector.connect(&endpoint, &self.options).await {
            Ok(client) => client,
            Err(e) => {
                warn!(instance = %id, endpoint = %endpoint, error = %e, "connect failed, releasing instance");
                Self::release_host(host, id).await;
                return Err(e.into());
            }
        };

        info!(
            instance = %id,
            endpoint = %endpoint,
            state = %LeaseState::Ready,
            "service instance ready"
        );

        Ok(ServiceLease {
            id,
            endpoint,
            client,
            host: Some(host),
            state: LeaseState::Ready,
        })
    }

    /// Runs `body` against a freshly acquired instance and releases the
    /// lease on every exit path: success, error, or panic. A panic is
    /// resumed after the release has run.
    pub async fn run_case<T, F, Fut>(&self, profile_name: &str, body: F) -> Result<T, HarnessError>
    where
        F: FnOnce(Arc<dyn ServiceClient>) -> Fut,
        Fut: Future<Output = Result<T, OperationError>>,
    {
        let mut lease = self.acquire(profile_name).await?;
        lease.mark_executing();

        let outcome = AssertUnwindSafe(body(lease.client())).catch_unwind().await;

        lease.release().await;

        match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(e.into()),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    async fn release_host(mut host: Box<dyn ProvisionedHost>, id: InstanceId) {
        if let Err(e) = host.teardown().await {
            warn!(instance = %id, error = %e, "teardown after failed setup also failed");
        }
    }
}

/// One instance plus one client connection, bound to a single test-case
/// scope. The instance never outlives the lease and is never shared.
pub struct ServiceLease {
    id: InstanceId,
    endpoint: ServiceEndpoint,
    client: Arc<dyn ServiceClient>,
    host: Option<Box<dyn ProvisionedHost>>,
    state: LeaseState,
}

impl ServiceLease {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    pub fn state(&self) -> LeaseState {
        self.state
    }

    pub fn client(&self) -> Arc<dyn ServiceClient> {
        Arc::clone(&self.client)
    }

    pub(crate) fn mark_executing(&mut self) {
        self.state = LeaseState::Executing;
    }

    /// Closes the connection first, then tears down the instance.
    /// Idempotent. Errors in either step are logged, not propagated, so
    /// one case's cleanup failure cannot block the next.
    #[instrument(skip(self), fields(instance = %self.id))]
    pub async fn release(&mut self) {
        if self.state == LeaseState::Closed {
            return;
        }
        self.state = LeaseState::TearingDown;

        if let Err(e) = self.client.close().await {
            warn!(error = %e, "closing client connection failed");
        }

        if let Some(mut host) = self.host.take() {
            if let Err(e) = host.teardown().await {
                warn!(error = %e, "instance teardown failed, ephemeral host may leak");
            }
        }

        self.state = LeaseState::Closed;
        info!("lease released");
    }
}

impl Drop for ServiceLease {
    fn drop(&mut self) {
        if !self.state.is_terminal() {
            warn!(instance = %self.id, state = %self.state, "lease dropped without release");
        }
    }
}
