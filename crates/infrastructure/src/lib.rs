//! Resumer Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod auth;
pub mod persistence;

pub use adapters::{ConsoleLinkPresenter, InquireResumeSelector, ReqwestResumeApi, SystemBrowser};
pub use auth::{OAuth2TokenClient, TcpRedirectListener};
pub use persistence::{FileCredentialStore, SettingsError, SettingsLoader};
