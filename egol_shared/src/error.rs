//! Error types for organism state handling.

use thiserror::Error;

/// Errors raised while constructing or advancing organism state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A constructor was called without its input record.
    #[error("invalid argument: no {0} argument")]
    InvalidArgument(&'static str),

    /// An update is missing its next state, or pairs two different state variants.
    #[error("malformed update: {0}")]
    MalformedUpdate(String),
}

pub type Result<T, E = StateError> = std::result::Result<T, E>;
