//! Authentication use cases.
//!
//! This module provides:
//! - The browser-based authorization code flow
//! - Bearer token acquisition with store fallback

mod acquire_token;
mod authorize;

pub use acquire_token::{AcquireToken, AcquiredToken, TokenOrigin};
pub use authorize::{AuthorizationFlow, AuthorizationGrant, AuthorizeUser};
