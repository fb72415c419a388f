//! Error types for store operations.
//!
//! Only permission denials raise errors. Absent keys, empty paths, and type
//! mismatches during plain-data traversal resolve to `Value::Nil` instead.

use std::sync::Arc;

use thiserror::Error;

/// The error type for store operations.
///
/// Both kinds are caller-input errors, raised at the point the denied
/// segment is encountered, with no partial result.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// `read` hit a permission-denied path segment.
    #[error("read not allowed: {property}")]
    ReadNotAllowed {
        /// The property name that failed the permission check.
        property: Arc<str>,
    },

    /// `write` hit a permission-denied path segment at a non-delegated level.
    #[error("write not allowed: {property}")]
    WriteNotAllowed {
        /// The property name that failed the permission check.
        property: Arc<str>,
    },
}

impl Error {
    /// Creates a read-denied error for the given property.
    #[must_use]
    pub fn read_not_allowed(property: impl Into<Arc<str>>) -> Self {
        Self::ReadNotAllowed {
            property: property.into(),
        }
    }

    /// Creates a write-denied error for the given property.
    #[must_use]
    pub fn write_not_allowed(property: impl Into<Arc<str>>) -> Self {
        Self::WriteNotAllowed {
            property: property.into(),
        }
    }

    /// Returns the property name that failed the permission check.
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::ReadNotAllowed { property } | Self::WriteNotAllowed { property } => property,
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;
