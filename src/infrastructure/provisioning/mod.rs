mod docker_provisioner;
mod mock_provisioner;

pub use docker_provisioner::{DockerHost, DockerProvisioner};
pub use mock_provisioner::{MockHost, MockProvisioner};
