//! Interactive resume picker.
//!
//! Shows a terminal multi-select with every titled resume preselected.

use std::fmt;

use async_trait::async_trait;
use inquire::{InquireError, MultiSelect};
use resumer_application::ports::{ResumeIdSource, SelectionError};
use resumer_domain::Resume;

const PROMPT: &str = "Resumes to update:";

/// One line of the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResumeChoice {
    id: String,
    label: String,
}

impl fmt::Display for ResumeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Builds the picker lines and the indices selected by default.
fn choices(candidates: &[Resume]) -> (Vec<ResumeChoice>, Vec<usize>) {
    let options = candidates
        .iter()
        .map(|resume| ResumeChoice {
            id: resume.id.clone(),
            label: match &resume.title {
                Some(title) if !title.is_empty() => format!("{title} ({})", resume.id),
                _ => resume.id.clone(),
            },
        })
        .collect();
    let preselected = candidates
        .iter()
        .enumerate()
        .filter(|(_, resume)| resume.title.as_deref().is_some_and(|t| !t.is_empty()))
        .map(|(index, _)| index)
        .collect();
    (options, preselected)
}

fn map_inquire_error(error: InquireError) -> SelectionError {
    match error {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            SelectionError::Cancelled
        }
        other => SelectionError::Prompt(other.to_string()),
    }
}

/// Terminal picker built on `inquire`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InquireResumeSelector;

impl InquireResumeSelector {
    /// Creates a new picker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResumeIdSource for InquireResumeSelector {
    async fn select(&self, candidates: &[Resume]) -> Result<Vec<String>, SelectionError> {
        let (options, preselected) = choices(candidates);

        // The prompt blocks on terminal input.
        let chosen = tokio::task::spawn_blocking(move || {
            MultiSelect::new(PROMPT, options)
                .with_default(&preselected)
                .prompt()
        })
        .await
        .map_err(|e| SelectionError::Prompt(e.to_string()))?
        .map_err(map_inquire_error)?;

        Ok(chosen.into_iter().map(|choice| choice.id).collect())
    }
}
