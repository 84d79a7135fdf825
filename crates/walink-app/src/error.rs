use thiserror::Error;
use walink_core::error::DomainError;
use walink_ports::error::PortError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("port error: {0}")]
    Port(#[from] PortError),
    #[error("config error: {0}")]
    Config(String),
}
