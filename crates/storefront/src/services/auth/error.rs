//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during session operations.
///
/// A credential mismatch is not an error: `login` reports it as `false`.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] bookverse_core::EmailError),

    /// Session storage could not be read or written.
    #[error("session storage error: {0}")]
    Storage(#[from] bookverse_core::StorageError),
}
