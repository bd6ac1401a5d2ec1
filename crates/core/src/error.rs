//! Error type shared by every semset crate.
//!
//! Collection code never retries and never repairs: store failures are
//! passed through unchanged as [`SemError::Store`], and structural problems
//! found while walking a collection surface as [`SemError::Corruption`].

use thiserror::Error;

/// Result alias used across the workspace.
pub type SemResult<T> = Result<T, SemError>;

/// Boxed source error carried by store failures.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by semset.
#[derive(Debug, Error)]
pub enum SemError {
    /// A collection was given an invalid backing node, or a structure was
    /// asked to adopt a node whose type is not a structure.
    #[error("invalid construction: {message}")]
    InvalidConstruction {
        /// What was wrong with the construction.
        message: String,
    },

    /// A lookup found nothing.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing thing.
        what: String,
    },

    /// A numeric position fell outside the supported role marker range.
    #[error("index {index} out of range [{min}, {max}]")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Smallest accepted index.
        min: usize,
        /// Largest accepted index.
        max: usize,
    },

    /// An operation was applied to an element of an incompatible type.
    #[error("wrong type: expected {expected}, got {actual}")]
    WrongType {
        /// Expected type description.
        expected: String,
        /// Actual type description.
        actual: String,
    },

    /// The encoded structure in the store violates a collection invariant.
    #[error("data corruption: {message}")]
    Corruption {
        /// Description of the broken invariant.
        message: String,
    },

    /// Malformed template, construction or configuration.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the problem.
        message: String,
    },

    /// Opaque failure reported by the store or its transport.
    #[error("store error: {message}")]
    Store {
        /// Description of the failure.
        message: String,
        /// Underlying error, if any.
        #[source]
        source: Option<BoxedSource>,
    },
}

impl SemError {
    /// Create an [`SemError::InvalidConstruction`].
    pub fn invalid_construction(message: impl Into<String>) -> Self {
        SemError::InvalidConstruction {
            message: message.into(),
        }
    }

    /// Create a [`SemError::NotFound`].
    pub fn not_found(what: impl Into<String>) -> Self {
        SemError::NotFound { what: what.into() }
    }

    /// Create a [`SemError::OutOfRange`].
    pub fn out_of_range(index: usize, min: usize, max: usize) -> Self {
        SemError::OutOfRange { index, min, max }
    }

    /// Create a [`SemError::WrongType`].
    pub fn wrong_type(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        SemError::WrongType {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a [`SemError::Corruption`].
    pub fn corruption(message: impl Into<String>) -> Self {
        SemError::Corruption {
            message: message.into(),
        }
    }

    /// Create an [`SemError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        SemError::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a [`SemError::Store`] without a source.
    pub fn store(message: impl Into<String>) -> Self {
        SemError::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a [`SemError::Store`] wrapping an underlying error.
    pub fn store_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SemError::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// True for [`SemError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, SemError::NotFound { .. })
    }

    /// True for [`SemError::OutOfRange`].
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, SemError::OutOfRange { .. })
    }

    /// True for [`SemError::InvalidConstruction`].
    pub fn is_invalid_construction(&self) -> bool {
        matches!(self, SemError::InvalidConstruction { .. })
    }

    /// True for [`SemError::Corruption`].
    pub fn is_corruption(&self) -> bool {
        matches!(self, SemError::Corruption { .. })
    }
}
