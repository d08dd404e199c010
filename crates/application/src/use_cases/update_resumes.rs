//! Update resumes use case.

use resumer_domain::{ApiError, BearerToken, PublishOutcome, ResumeList, ResumeSelection};
use tracing::{info, warn};

use crate::ports::{ResumeApi, ResumeIdSource};
use crate::ApplicationResult;

/// Result of republishing one resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpdate {
    /// Requested id.
    pub id: String,
    /// Title from the listing, if the id was listed.
    pub title: Option<String>,
    /// Outcome of the publish call.
    pub result: Result<PublishOutcome, ApiError>,
}

impl ResumeUpdate {
    /// Returns true if the provider confirmed the publish.
    #[must_use]
    pub fn is_published(&self) -> bool {
        matches!(self.result, Ok(PublishOutcome::Published))
    }
}

/// Per-resume results of a run, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateReport {
    /// One entry per requested id, duplicates included.
    pub entries: Vec<ResumeUpdate>,
}

impl UpdateReport {
    /// Number of resumes the provider confirmed.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.is_published()).count()
    }

    /// Number of resumes that were not confirmed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    /// Returns true if every requested resume was published.
    #[must_use]
    pub fn all_published(&self) -> bool {
        self.failed() == 0
    }
}

/// Use case for listing the user's resumes and bumping the selected ones.
pub struct UpdateResumes<A: ResumeApi, S: ResumeIdSource> {
    api: A,
    source: S,
}

impl<A: ResumeApi, S: ResumeIdSource> UpdateResumes<A, S> {
    /// Creates a new `UpdateResumes` use case.
    #[must_use]
    pub const fn new(api: A, source: S) -> Self {
        Self { api, source }
    }

    /// Fetches the listing.
    ///
    /// # Errors
    /// Any failure here ends the run; nothing is published.
    pub async fn list(&self, token: &BearerToken) -> ApplicationResult<ResumeList> {
        let listing = self.api.list_my_resumes(token).await?;
        info!(count = listing.items.len(), "Listed resumes");
        Ok(listing)
    }

    /// Turns the selection into concrete ids, prompting only when needed.
    ///
    /// With nothing selected, zero resumes yield no ids and a single resume
    /// is chosen without asking.
    ///
    /// # Errors
    /// Returns an error if the prompt fails or is cancelled.
    pub async fn select(
        &self,
        selection: &ResumeSelection,
        listing: &ResumeList,
    ) -> ApplicationResult<Vec<String>> {
        if let Some(ids) = selection.resolve(listing) {
            return Ok(ids);
        }
        match listing.items.as_slice() {
            [] => Ok(Vec::new()),
            [only] => Ok(vec![only.id.clone()]),
            items => Ok(self.source.select(items).await?),
        }
    }

    /// Republishes each id once, sequentially.
    ///
    /// A failure for one id is recorded and the remaining ids are still attempted.
    pub async fn republish_each(
        &self,
        token: &BearerToken,
        ids: &[String],
        listing: &ResumeList,
    ) -> UpdateReport {
        let mut entries = Vec::with_capacity(ids.len());
        for id in ids {
            let result = self.api.republish_resume(token, id).await;
            match &result {
                Ok(PublishOutcome::Published) => info!(resume = %id, "Resume published"),
                Ok(PublishOutcome::NotPublished { status }) => {
                    warn!(resume = %id, status, "Resume not published");
                }
                Err(e) => warn!(resume = %id, error = %e, "Publish failed"),
            }
            entries.push(ResumeUpdate {
                id: id.clone(),
                title: listing.find(id).and_then(|r| r.title.clone()),
                result,
            });
        }
        UpdateReport { entries }
    }

    /// Lists, selects and republishes.
    ///
    /// # Errors
    /// Fails only if listing or selection fails; publish failures are in the report.
    pub async fn execute(
        &self,
        token: &BearerToken,
        selection: &ResumeSelection,
    ) -> ApplicationResult<UpdateReport> {
        let listing = self.list(token).await?;
        let ids = self.select(selection, &listing).await?;
        Ok(self.republish_each(token, &ids, &listing).await)
    }
}
