#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("connect failed: {0}")]
    ConnectFailed(String),
    #[error("timed out: {0}")]
    TimedOut(String),
    #[error("close failed: {0}")]
    CloseFailed(String),
}
