//! System browser adapter

use resumer_application::ports::{BrowserError, BrowserLauncher};

/// Opens URLs with the platform's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl SystemBrowser {
    /// Creates a new system browser launcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), BrowserError> {
        open::that(url).map_err(|e| BrowserError(e.to_string()))
    }
}
