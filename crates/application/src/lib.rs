//! Resumer Application - Use cases and ports
//!
//! This crate orchestrates the domain through the ports it defines; the
//! infrastructure layer supplies the implementations.

pub mod auth;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use auth::{
    AcquireToken, AcquiredToken, AuthorizationFlow, AuthorizationGrant, AuthorizeUser, TokenOrigin,
};
pub use error::{ApplicationError, ApplicationResult};
pub use use_cases::{ResumeUpdate, UpdateReport, UpdateResumes};
