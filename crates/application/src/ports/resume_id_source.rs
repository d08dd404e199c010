//! Resume id source port

use async_trait::async_trait;
use resumer_domain::Resume;

/// Failure of an interactive selection.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// The user aborted the prompt.
    #[error("selection cancelled")]
    Cancelled,

    /// The prompt could not be shown.
    #[error("prompt failed: {0}")]
    Prompt(String),
}

/// Port for asking the user which resumes to republish.
#[async_trait]
pub trait ResumeIdSource: Send + Sync {
    /// Returns the ids chosen among `candidates`.
    ///
    /// # Errors
    /// Returns an error if the prompt failed or was cancelled.
    async fn select(&self, candidates: &[Resume]) -> Result<Vec<String>, SelectionError>;
}
