//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum GeoscriptTypesError {
    /// Projection definition could not be turned into a projection.
    #[error("invalid projection definition: {0}")]
    InvalidProjection(String),
}
