//! Which resumes a run should republish.

use crate::error::{DomainError, DomainResult};
use crate::input;
use crate::resume::ResumeList;

/// Resume ids requested for a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResumeSelection {
    /// Every resume the user owns (`*`).
    All,
    /// An explicit list of ids, republished in this order.
    Ids(Vec<String>),
    /// Nothing was given; ask the user.
    #[default]
    Prompt,
}

impl ResumeSelection {
    /// Sentinel meaning "all resumes".
    pub const ALL: &'static str = "*";

    /// Parses a comma-separated id list.
    ///
    /// Blank input or `.` yields [`ResumeSelection::Prompt`]; a lone `*` yields
    /// [`ResumeSelection::All`]. Items are trimmed and empty items dropped.
    ///
    /// # Errors
    /// Returns `InvalidResumeId` for ids that could not be placed in a URL path.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if !input::is_given(raw) {
            return Ok(Self::Prompt);
        }
        let raw = raw.trim();

        let ids: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();

        match ids.as_slice() {
            [] => Ok(Self::Prompt),
            [only] if only == Self::ALL => Ok(Self::All),
            _ => {
                if let Some(bad) = ids.iter().find(|id| !is_valid_resume_id(id)) {
                    return Err(DomainError::InvalidResumeId(bad.clone()));
                }
                Ok(Self::Ids(ids))
            }
        }
    }

    /// Resolves the ids without user interaction.
    ///
    /// Returns `None` for [`ResumeSelection::Prompt`].
    #[must_use]
    pub fn resolve(&self, listing: &ResumeList) -> Option<Vec<String>> {
        match self {
            Self::All => Some(listing.ids()),
            Self::Ids(ids) => Some(ids.clone()),
            Self::Prompt => None,
        }
    }
}

/// Provider ids are opaque tokens of letters, digits, `-` and `_`.
#[must_use]
pub fn is_valid_resume_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resume::Resume;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_unset_values() {
        assert_eq!(ResumeSelection::parse("").unwrap(), ResumeSelection::Prompt);
        assert_eq!(ResumeSelection::parse(" . ").unwrap(), ResumeSelection::Prompt);
        assert_eq!(ResumeSelection::parse(", ,").unwrap(), ResumeSelection::Prompt);
    }

    #[test]
    fn test_parse_all_sentinel() {
        assert_eq!(ResumeSelection::parse(" * ").unwrap(), ResumeSelection::All);
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(
            ResumeSelection::parse("a1, b2,,c3 ").unwrap(),
            ResumeSelection::Ids(vec!["a1".into(), "b2".into(), "c3".into()])
        );
    }

    #[test]
    fn test_parse_rejects_path_characters() {
        assert_eq!(
            ResumeSelection::parse("a1,../b").unwrap_err(),
            DomainError::InvalidResumeId("../b".into())
        );
        assert!(ResumeSelection::parse("a1,*").is_err());
    }

    #[test]
    fn test_resolve_against_listing() {
        let listing = ResumeList {
            items: vec![
                Resume::new("r1", Some("One"), None),
                Resume::new("r2", None, None),
            ],
        };
        assert_eq!(
            ResumeSelection::All.resolve(&listing),
            Some(vec!["r1".to_string(), "r2".to_string()])
        );
        assert_eq!(
            ResumeSelection::Ids(vec!["zz".into()]).resolve(&listing),
            Some(vec!["zz".to_string()])
        );
        assert_eq!(ResumeSelection::Prompt.resolve(&listing), None);
    }
}
