#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
    #[error("unknown profile: {0}")]
    UnknownProfile(String),
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("setup failed: {0}")]
    SetupFailed(String),
    #[error("port {0} not exposed by instance")]
    PortNotExposed(u16),
    #[error("teardown failed: {0}")]
    TeardownFailed(String),
}
