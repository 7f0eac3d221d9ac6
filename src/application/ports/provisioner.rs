use async_trait::async_trait;

use crate::domain::ServiceProfile;

use super::ProvisioningError;

/// A running, network-reachable service instance. Owned exclusively by
/// one lease; torn down exactly once.
#[async_trait]
pub trait ProvisionedHost: Send + Sync {
    fn host_name(&self) -> &str;

    /// Maps a logical service port to the actual host-side port.
    async fn mapped_port(&self, logical_port: u16) -> Result<u16, ProvisioningError>;

    async fn teardown(&mut self) -> Result<(), ProvisioningError>;
}

/// Provisioning backend. Blocks until the instance reports ready or the
/// backend gives up.
#[async_trait]
pub trait Provisioner: Send + Sync {
    async fn provision(
        &self,
        profile: &ServiceProfile,
    ) -> Result<Box<dyn ProvisionedHost>, ProvisioningError>;
}
