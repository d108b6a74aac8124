//! Error types for Lattice Gallery core.

use crate::object::ObjectId;

/// Errors that can occur during object tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectError {
    /// The object ID is invalid or has been removed.
    #[error("Invalid or removed object ID {0:?}")]
    InvalidObjectId(ObjectId),

    /// Attempted to set an object as its own parent/ancestor.
    #[error("Cannot set an object as its own parent or ancestor")]
    CircularParentage,
}

/// Result type for object operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;
