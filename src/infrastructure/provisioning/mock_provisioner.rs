use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ProvisionedHost, Provisioner, ProvisioningError};
use crate::domain::ServiceProfile;

/// In-memory provisioning backend for harness tests. Counts setups and
/// teardowns so tests can assert release ran exactly once.
pub struct MockProvisioner {
    fail_setup: bool,
    provisioned: Arc<AtomicUsize>,
    teardowns: Arc<AtomicUsize>,
}

impl MockProvisioner {
    pub fn new() -> Self {
        Self {
            fail_setup: false,
            provisioned: Arc::new(AtomicUsize::new(0)),
            teardowns: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A backend that cannot produce instances.
    pub fn failing() -> Self {
        Self {
            fail_setup: true,
            ..Self::new()
        }
    }

    pub fn provisioned_count(&self) -> usize {
        self.provisioned.load(Ordering::SeqCst)
    }

    pub fn teardown_count(&self) -> usize {
        self.teardowns.load(Ordering::SeqCst)
    }
}

impl Default for MockProvisioner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provisioner for MockProvisioner {
    async fn provision(
        &self,
        profile: &ServiceProfile,
    ) -> Result<Box<dyn ProvisionedHost>, ProvisioningError> {
        if self.fail_setup {
            return Err(ProvisioningError::BackendUnavailable(
                "mock backend refused setup".to_string(),
            ));
        }
        self.provisioned.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockHost {
            service_port: profile.service_port,
            teardowns: Arc::clone(&self.teardowns),
        }))
    }
}

pub struct MockHost {
    service_port: u16,
    teardowns: Arc<AtomicUsize>,
}

#[async_trait]
impl ProvisionedHost for MockHost {
    fn host_name(&self) -> &str {
        "localhost"
    }

    async fn mapped_port(&self, logical_port: u16) -> Result<u16, ProvisioningError> {
        if logical_port == self.service_port {
            Ok(logical_port)
        } else {
            Err(ProvisioningError::PortNotExposed(logical_port))
        }
    }

    async fn teardown(&mut self) -> Result<(), ProvisioningError> {
        self.teardowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
