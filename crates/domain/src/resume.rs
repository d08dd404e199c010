//! Resume listing and publication types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A resume owned by the authenticated user.
///
/// All fields come from the provider; nothing here is modified locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    /// Provider-assigned identifier.
    pub id: String,
    /// Resume title; drafts may have none.
    #[serde(default)]
    pub title: Option<String>,
    /// Last-updated timestamp as reported by the provider.
    #[serde(default)]
    pub updated: Option<String>,
}

impl Resume {
    /// Creates a resume value.
    #[must_use]
    pub fn new(id: impl Into<String>, title: Option<&str>, updated: Option<&str>) -> Self {
        Self {
            id: id.into(),
            title: title.map(String::from),
            updated: updated.map(String::from),
        }
    }

    /// Title, or an empty string when the provider sent none.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

/// Body of the "my resumes" endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResumeList {
    /// Resumes in provider order.
    #[serde(default)]
    pub items: Vec<Resume>,
}

impl ResumeList {
    /// Finds a resume by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Resume> {
        self.items.iter().find(|resume| resume.id == id)
    }

    /// Ids of every listed resume, in provider order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|resume| resume.id.clone()).collect()
    }
}

/// Result of a publish call that did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The provider answered `204 No Content`.
    Published,
    /// The provider answered without an error document but not with 204,
    /// e.g. when the resume was bumped too recently.
    NotPublished {
        /// HTTP status that was returned.
        status: u16,
    },
}

impl PublishOutcome {
    /// Status code the provider uses for a successful publish.
    pub const PUBLISHED_STATUS: u16 = 204;

    /// Classifies a non-error response by its status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        if status == Self::PUBLISHED_STATUS {
            Self::Published
        } else {
            Self::NotPublished { status }
        }
    }

    /// Returns true for [`PublishOutcome::Published`].
    #[must_use]
    pub const fn is_published(self) -> bool {
        matches!(self, Self::Published)
    }
}

/// Failures of authenticated API calls.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The provider returned an error document.
    #[error("provider error: {0}")]
    Provider(String),

    /// The request did not complete.
    #[error("network error: {0}")]
    Network(String),

    /// The response could not be decoded.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}
