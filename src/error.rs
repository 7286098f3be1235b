//! Defines [`GeoFixtureError`], representing all errors returned by this crate.

use std::fmt;

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoFixtureError {
    /// A point token could neither be read as coordinates nor resolved through the grid.
    ///
    /// This signals a malformed test scenario, not a recoverable condition.
    #[error("Scenario error: Point '{token}' {reason}")]
    InvalidPointReference {
        /// The offending token, with surrounding whitespace removed.
        token: String,
        /// Why the token could not be resolved.
        reason: PointReferenceError,
    },

    /// Grid configuration that cannot describe a lattice.
    #[error("Invalid grid specification: {0}")]
    InvalidGridSpec(String),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

impl GeoFixtureError {
    pub(crate) fn invalid_point(token: &str, reason: PointReferenceError) -> Self {
        Self::InvalidPointReference {
            token: token.to_string(),
            reason,
        }
    }
}

/// The two ways a point reference can fail to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointReferenceError {
    /// Token holds no space and is not an integer.
    NotANumber,

    /// Token is an integer id with no entry in the current grid.
    NotInGrid,
}

impl fmt::Display for PointReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointReferenceError::NotANumber => write!(f, "is not a number"),
            PointReferenceError::NotInGrid => write!(f, "not found in grid"),
        }
    }
}

/// Crate-specific result type.
pub type GeoFixtureResult<T> = std::result::Result<T, GeoFixtureError>;
