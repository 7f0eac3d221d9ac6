use async_trait::async_trait;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ContainerRequest, GenericImage, ImageExt, TestcontainersError};
use tracing::{info, instrument};

use crate::application::ports::{ProvisionedHost, Provisioner, ProvisioningError};
use crate::domain::ServiceProfile;

/// Provisions service instances as throwaway Docker containers.
pub struct DockerProvisioner;

impl DockerProvisioner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DockerProvisioner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provisioner for DockerProvisioner {
    #[instrument(skip(self, profile), fields(image = %profile.image, tag = %profile.tag))]
    async fn provision(
        &self,
        profile: &ServiceProfile,
    ) -> Result<Box<dyn ProvisionedHost>, ProvisioningError> {
        let mut image = GenericImage::new(profile.image.clone(), profile.tag.clone())
            .with_exposed_port(ContainerPort::Tcp(profile.service_port));

        if let Some(line) = &profile.ready_log_line {
            image = image.with_wait_for(WaitFor::message_on_stderr(line.as_str()));
        }

        let mut request = ContainerRequest::from(image);
        for (key, value) in &profile.env {
            request = request.with_env_var(key.clone(), value.clone());
        }

        let container = request.start().await.map_err(|e| match e {
            TestcontainersError::Client(inner) => {
                ProvisioningError::BackendUnavailable(inner.to_string())
            }
            other => ProvisioningError::SetupFailed(other.to_string()),
        })?;

        info!(container_id = %container.id(), "container started");

        Ok(Box::new(DockerHost {
            container: Some(container),
            host: "127.0.0.1".to_string(),
        }))
    }
}

pub struct DockerHost {
    container: Option<ContainerAsync<GenericImage>>,
    host: String,
}

#[async_trait]
impl ProvisionedHost for DockerHost {
    fn host_name(&self) -> &str {
        &self.host
    }

    async fn mapped_port(&self, logical_port: u16) -> Result<u16, ProvisioningError> {
        let container = self
            .container
            .as_ref()
            .ok_or(ProvisioningError::PortNotExposed(logical_port))?;

        container
            .get_host_port_ipv4(logical_port)
            .await
            .map_err(|_| ProvisioningError::PortNotExposed(logical_port))
    }

    async fn teardown(&mut self) -> Result<(), ProvisioningError> {
        if let Some(container) = self.container.take() {
            container
                .stop()
                .await
                .map_err(|e| ProvisioningError::TeardownFailed(e.to_string()))?;
            info!(container_id = %container.id(), "container stopped");
        }
        Ok(())
    }
}
