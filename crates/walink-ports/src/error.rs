use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("storage unavailable")]
    Unavailable,
}
