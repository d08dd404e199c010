//! Console lines for the listing and the update results.

use resumer_application::ResumeUpdate;
use resumer_domain::{PublishOutcome, Resume};

fn label(title: Option<&str>, id: &str) -> String {
    match title {
        Some(title) if !title.is_empty() => format!("{title} - {id}"),
        _ => id.to_string(),
    }
}

/// `- <title> - <id>, <updated>`
#[must_use]
pub fn listing_line(resume: &Resume) -> String {
    format!(
        "- {}, {}",
        label(resume.title.as_deref(), &resume.id),
        resume.updated.as_deref().unwrap_or("never updated")
    )
}

/// `- <title> - <id> - updated`, or the reason it was not.
#[must_use]
pub fn report_line(entry: &ResumeUpdate) -> String {
    let outcome = match &entry.result {
        Ok(PublishOutcome::Published) => "updated".to_string(),
        Ok(PublishOutcome::NotPublished { status }) => format!("not updated (status {status})"),
        Err(e) => format!("failed ({e})"),
    };
    format!("- {} - {outcome}", label(entry.title.as_deref(), &entry.id))
}
