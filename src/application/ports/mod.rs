mod connection_error;
mod connector;
mod operation_error;
mod provisioner;
mod provisioning_error;
mod service_client;

pub use connection_error::ConnectionError;
pub use connector::{ClientConnector, ConnectOptions};
pub use operation_error::OperationError;
pub use provisioner::{ProvisionedHost, Provisioner};
pub use provisioning_error::ProvisioningError;
pub use service_client::ServiceClient;
