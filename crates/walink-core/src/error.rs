use thiserror::Error;

use crate::phone::InvalidNumber;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("phone number is empty")]
    EmptyInput,
    #[error("phone number contains characters other than digits")]
    InvalidCharacters,
    #[error("not a saudi mobile number: {0}")]
    InvalidSaudiNumber(InvalidNumber),
    #[error("link already in history at position {position}")]
    DuplicateLink { position: usize },
    #[error("invalid link: {0}")]
    InvalidLink(String),
}
