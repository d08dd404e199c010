//! Values supplied on the command line or in the environment.

/// Marker accepted as "not given", kept for scripts that pass `-r .` or `-t .`.
pub const UNSET: &str = ".";

/// Returns true if `raw` counts as given: not blank and not [`UNSET`].
#[must_use]
pub fn is_given(raw: &str) -> bool {
    let raw = raw.trim();
    !raw.is_empty() && raw != UNSET
}
