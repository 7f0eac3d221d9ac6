use crate::application::ports::{ConnectionError, OperationError, ProvisioningError};

/// Failure of a harness-managed test case. Setup errors abort the case;
/// body errors propagate; teardown errors are logged, never surfaced here.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Operation(#[from] OperationError),
}
