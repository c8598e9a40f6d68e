//! Contract error types for the user profile module
//!
//! These errors are transport-agnostic and used for inter-module communication.
//! Field-level denial is not an error: denied fields are omitted. `Forbidden` is
//! only raised when the caller may not use an operation at all.

use std::path::PathBuf;

/// User profile domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// A field-definition document could not be read or parsed
    #[error("Invalid profile schema '{}': {reason}", path.display())]
    SchemaParse {
        /// Offending document
        path: PathBuf,
        /// Parser or shape error
        reason: String,
    },

    /// Storage layer failure while reading or writing values
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The authorizer failed to evaluate a permission
    #[error("Authorization check failed: {0}")]
    Authorization(String),

    /// The acting user lacks the permission an operation requires
    #[error("Missing permission: {permission}")]
    Forbidden {
        /// Permission that was checked
        permission: String,
    },
}
