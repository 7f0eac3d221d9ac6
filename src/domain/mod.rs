mod document;
mod endpoint;
mod instance_id;
mod lease_state;
mod service_profile;

pub use document::Document;
pub use endpoint::ServiceEndpoint;
pub use instance_id::InstanceId;
pub use lease_state::LeaseState;
pub use service_profile::ServiceProfile;
