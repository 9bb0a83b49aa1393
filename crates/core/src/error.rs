//! Client error model.

use thiserror::Error;

/// Result type used across the client foundation.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client-level error.
///
/// Keep this focused on deterministic failures of the pure layer (parsing,
/// validation). Transport and provider failures belong to the crates that own
/// those boundaries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty or contains whitespace).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A route name did not match any known destination.
    #[error("unknown route: {0}")]
    UnknownRoute(String),
}

impl ClientError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_route(msg: impl Into<String>) -> Self {
        Self::UnknownRoute(msg.into())
    }
}
