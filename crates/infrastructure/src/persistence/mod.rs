//! File-backed settings and credentials.

mod settings_repository;
mod token_file;

pub use settings_repository::{SettingsError, SettingsLoader};
pub use token_file::FileCredentialStore;
