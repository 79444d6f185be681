use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Platform capability not available: {0}")]
    NotAvailable(String),

    #[error("Platform operation failed: {0}")]
    OperationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlatformError>;
