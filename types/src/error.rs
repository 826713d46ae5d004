//! Errors raised while parsing or validating shared types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid principal: {0:?}")]
    InvalidPrincipal(String),

    #[error("unknown schedule type code {0}")]
    UnknownScheduleType(u8),

    #[error("unknown schedule type name {0:?}")]
    UnknownScheduleName(String),

    #[error("invalid scheduler parameters: {0}")]
    InvalidParams(String),
}
