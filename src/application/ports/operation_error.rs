#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
}
