//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod browser;
mod credential_store;
mod link_presenter;
mod redirect_listener;
mod resume_api;
mod resume_id_source;
mod token_endpoint;

pub use browser::{BrowserError, BrowserLauncher};
pub use credential_store::{CredentialError, CredentialStore};
pub use link_presenter::LinkPresenter;
pub use redirect_listener::RedirectListener;
pub use resume_api::ResumeApi;
pub use resume_id_source::{ResumeIdSource, SelectionError};
pub use token_endpoint::TokenEndpoint;
