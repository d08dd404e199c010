//! Application error types

use resumer_domain::{ApiError, AuthError, DomainError};
use thiserror::Error;

use crate::ports::{CredentialError, SelectionError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Obtaining a bearer token failed.
    #[error("authorization error: {0}")]
    Auth(#[from] AuthError),

    /// An authenticated API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Reading or writing the stored token failed.
    #[error("credential store error: {0}")]
    Credentials(#[from] CredentialError),

    /// Choosing resumes interactively failed.
    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
