//! Error types used by the crate.

use geoscript_types::error::GeoscriptTypesError;
use thiserror::Error;

/// Violation of the usage contract of a [`CustomProjection`](crate::CustomProjection).
///
/// These errors are returned immediately and are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// Projection functions are not loaded yet.
    #[error("projection not yet loaded")]
    NotReady,
    /// Required argument was not given.
    #[error("required argument missing: {0}")]
    MissingArgument(&'static str),
}

/// Failure to load the projection functions.
///
/// A load is shared between all projections referencing the same source, so the error is cloned to every
/// waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// I/O error (network or file).
    #[error("failed to load projection source: {0}")]
    Io(String),
    /// Source does not exist.
    #[error("projection source not found: {0}")]
    NotFound(String),
    /// Source is not in the persistent cache and the loader is in offline mode.
    #[error("projection source {0} is not available in offline mode")]
    Offline(String),
    /// Malformed `data:` uri.
    #[error("invalid data uri: {0}")]
    DataUri(String),
    /// Source content is not a valid projection script.
    #[error("invalid projection script: {0}")]
    Script(String),
    /// Script describes a projection that cannot be constructed.
    #[error("invalid projection: {0}")]
    Projection(String),
}

impl From<reqwest::Error> for LoadError {
    fn from(value: reqwest::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<GeoscriptTypesError> for LoadError {
    fn from(value: GeoscriptTypesError) -> Self {
        match value {
            GeoscriptTypesError::InvalidProjection(definition) => Self::Projection(definition),
        }
    }
}
