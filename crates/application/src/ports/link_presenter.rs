//! Link presenter port

/// Port for showing the authorization link to the user.
///
/// Unlike log output this is never filtered, so the user can always finish
/// the flow by hand.
pub trait LinkPresenter: Send + Sync {
    /// Shows `url` to the user.
    fn present(&self, url: &str);
}
