//! Turning one project identifier into zero or one output rows.
//!
//! The [`RowBuilder`] fetches the project document, applies the tag filter
//! and, for matching projects, collects the scraped data the configured
//! schema needs and merges it into an [`OutputRow`].

use tracing::{debug, warn};

use crate::config::{OutputSchema, RunConfig, TagFilter};
use crate::error::ScrapeError;
use crate::project::{ExtendedFields, Indicators, OutputRow, ProjectMetadata, join_urls};
use crate::source::ProjectSource;

/// Builds output rows from a [`ProjectSource`].
pub struct RowBuilder<S> {
    source: S,
    tag_filter: TagFilter,
    schema: OutputSchema,
}

impl<S: ProjectSource> RowBuilder<S> {
    /// Create a builder reading from `source` with the filter and schema of
    /// `config`.
    #[must_use]
    pub fn new(source: S, config: &RunConfig) -> Self {
        Self {
            source,
            tag_filter: config.tag_filter.clone(),
            schema: config.schema,
        }
    }

    /// The schema rows are built for.
    #[must_use]
    pub const fn schema(&self) -> OutputSchema {
        self.schema
    }

    /// Build the row for `project`.
    ///
    /// Returns `Ok(None)` when none of the project's tags matches the filter.
    /// Only the first matching tag is considered.
    ///
    /// # Errors
    ///
    /// Any fetch or extraction error for this project. Nothing is returned
    /// for a project unless every field was assembled.
    pub fn build(&self, project: &str) -> Result<Option<OutputRow>, ScrapeError> {
        let metadata = self.source.fetch_project(project)?;

        if let Some(message) = &metadata.error {
            warn!(project, %message, "OpenHub returned an error");
        }

        let Some(matched_tag) = metadata
            .first_matching_tag(&self.tag_filter)
            .map(str::to_owned)
        else {
            debug!(project, "no tag matches the filter, skipping");
            return Ok(None);
        };

        debug!(project, tag = %matched_tag, "tag matched");

        let user_count = self.source.fetch_user_count(project)?;

        let extended = if self.schema.needs_repository_data() {
            Some(self.extended_fields(project, &metadata, matched_tag)?)
        } else {
            None
        };

        Ok(Some(OutputRow {
            metadata,
            user_count,
            extended,
        }))
    }

    fn extended_fields(
        &self,
        project: &str,
        metadata: &ProjectMetadata,
        matched_tag: String,
    ) -> Result<ExtendedFields, ScrapeError> {
        let locs = self.source.fetch_language_locs(project)?;
        let repositories = join_urls(&self.source.fetch_enlistments(project)?);
        let stats = self.source.fetch_repo_stats(project)?;
        let indicators = Indicators::derive(&locs, &metadata.main_language);
        let years = metadata.years_active()?;

        Ok(ExtendedFields {
            matched_tag,
            locs,
            indicators,
            years,
            repositories,
            stats,
        })
    }
}
