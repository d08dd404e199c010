//! Resumer Domain - Core types
//!
//! This crate defines the domain model for the Resumer resume publisher.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod input;
pub mod provider;
pub mod resume;
pub mod selection;
pub mod settings;

pub use auth::{
    AuthError, AuthState, AuthorizationCode, BearerToken, CallbackParams, RedirectCallback,
    parse_redirect_request,
};
pub use error::{DomainError, DomainResult};
pub use provider::{provider_error_in, provider_error_message};
pub use resume::{ApiError, PublishOutcome, Resume, ResumeList};
pub use selection::{ResumeSelection, is_valid_resume_id};
pub use settings::{ProviderSettings, PublishSettings, RedirectSettings, Settings};
