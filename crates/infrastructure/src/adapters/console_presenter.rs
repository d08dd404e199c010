//! Terminal adapter for the authorization link

use resumer_application::ports::LinkPresenter;

/// Prints the authorization link on stdout, next to the listing and the report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLinkPresenter;

impl ConsoleLinkPresenter {
    /// Creates a new console presenter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn instructions(url: &str) -> String {
    format!("Open this link in your browser to authorize:\n\n{url}\n")
}

impl LinkPresenter for ConsoleLinkPresenter {
    fn present(&self, url: &str) {
        println!("{}", instructions(url));
    }
}
