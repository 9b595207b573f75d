//! Errors raised while parsing fundamental types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid account id: {0}")]
    InvalidAccount(String),

    #[error("invalid unsigned integer: {0}")]
    InvalidUint(String),
}
