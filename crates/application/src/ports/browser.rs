//! Browser launcher port

/// The authorization URL could not be handed to a browser.
#[derive(Debug, thiserror::Error)]
#[error("cannot open browser: {0}")]
pub struct BrowserError(pub String);

/// Port for showing the authorization page to the user.
pub trait BrowserLauncher: Send + Sync {
    /// Opens `url` in the user's browser.
    ///
    /// # Errors
    /// Returns an error if no browser could be started. The link is presented
    /// to the user either way.
    fn open(&self, url: &str) -> Result<(), BrowserError>;
}
