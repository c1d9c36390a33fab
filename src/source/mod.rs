//! Upstream data sources for one project.
//!
//! [`ProjectSource`] is the narrow interface the row builder talks to. Every
//! dependency on OpenHub's markup (label texts, class names, table layout)
//! lives behind it, in [`OpenHub`] and its per-page submodules, so a change
//! upstream only touches this module.

pub mod commits;
pub mod enlistments;
pub mod languages;
pub mod users;

use tracing::debug;

use crate::client::{Endpoints, Fetch};
use crate::config::RunConfig;
use crate::error::ScrapeError;
use crate::extract::XmlDocument;
use crate::project::{LanguageLocs, ProjectMetadata, RepoStats};

/// Capabilities the row builder needs from the upstream service.
pub trait ProjectSource {
    /// Core metadata from the project XML document.
    ///
    /// # Errors
    ///
    /// Transport and XML errors. An `error` element in the document is not an
    /// error here; it is reported through [`ProjectMetadata::error`].
    fn fetch_project(&self, project: &str) -> Result<ProjectMetadata, ScrapeError>;

    /// Corrected user count.
    ///
    /// # Errors
    ///
    /// Transport errors and unreadable pagination labels.
    fn fetch_user_count(&self, project: &str) -> Result<u64, ScrapeError>;

    /// Code lines per recognized language plus the bucket of the rest.
    ///
    /// # Errors
    ///
    /// Transport errors and non-numeric line counts.
    fn fetch_language_locs(&self, project: &str) -> Result<LanguageLocs, ScrapeError>;

    /// Aggregate commit statistics.
    ///
    /// # Errors
    ///
    /// Transport errors and missing labels.
    fn fetch_repo_stats(&self, project: &str) -> Result<RepoStats, ScrapeError>;

    /// Repository URLs of all enlistments.
    ///
    /// # Errors
    ///
    /// Transport and XML errors.
    fn fetch_enlistments(&self, project: &str) -> Result<Vec<String>, ScrapeError>;
}

/// [`ProjectSource`] backed by the OpenHub API and web pages.
pub struct OpenHub<F> {
    fetch: F,
    endpoints: Endpoints,
    api_key: String,
}

impl<F: Fetch> OpenHub<F> {
    /// Create a source that issues its requests through `fetch`.
    #[must_use]
    pub fn new(fetch: F, config: &RunConfig) -> Self {
        Self {
            fetch,
            endpoints: Endpoints::new(&config.base_url),
            api_key: config.api_key.clone(),
        }
    }
}

impl<F: Fetch> ProjectSource for OpenHub<F> {
    fn fetch_project(&self, project: &str) -> Result<ProjectMetadata, ScrapeError> {
        let url = self.endpoints.project_xml(project, &self.api_key)?;
        let body = self.fetch.get(&url)?;
        let metadata = ProjectMetadata::from_xml(&XmlDocument::parse(&body)?);
        debug!(project, tags = metadata.tags.len(), "parsed project document");
        Ok(metadata)
    }

    fn fetch_user_count(&self, project: &str) -> Result<u64, ScrapeError> {
        users::fetch_user_count(&self.fetch, &self.endpoints, project)
    }

    fn fetch_language_locs(&self, project: &str) -> Result<LanguageLocs, ScrapeError> {
        languages::fetch_language_locs(&self.fetch, &self.endpoints, project)
    }

    fn fetch_repo_stats(&self, project: &str) -> Result<RepoStats, ScrapeError> {
        commits::fetch_repo_stats(&self.fetch, &self.endpoints, project)
    }

    fn fetch_enlistments(&self, project: &str) -> Result<Vec<String>, ScrapeError> {
        enlistments::fetch_enlistments(&self.fetch, &self.endpoints, project, &self.api_key)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// Serves canned bodies and records every requested URL.
    #[derive(Default)]
    struct StubFetch {
        pages: HashMap<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl StubFetch {
        fn with(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }
    }

    impl Fetch for StubFetch {
        fn get(&self, url: &str) -> Result<String, ScrapeError> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| ScrapeError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    fn config() -> RunConfig {
        let mut config = RunConfig::new("KEY").unwrap();
        config.base_url = "http://hub.test".to_string();
        config
    }

    #[test]
    fn test_user_count_reads_last_page() {
        let stub = StubFetch::default()
            .with(
                "http://hub.test/p/demo/users",
                r#"<label class="paginate">Showing page 1 of 21</label>"#,
            )
            .with(
                "http://hub.test/p/demo/users?page=21",
                &r#"<div class="avatar"></div>"#.repeat(5),
            );
        let source = OpenHub::new(&stub, &config());

        assert_eq!(source.fetch_user_count("demo").unwrap(), 205);
        assert_eq!(stub.requested.borrow().len(), 2);
    }

    #[test]
    fn test_user_count_overflow_fails_project() {
        let stub = StubFetch::default()
            .with(
                "http://hub.test/p/demo/users",
                r#"<label class="paginate">Page 1 of 9,000,000,000,000,000,000</label>"#,
            )
            .with(
                "http://hub.test/p/demo/users?page=9000000000000000000",
                r#"<div class="avatar"></div>"#,
            );
        let source = OpenHub::new(&stub, &config());

        assert!(matches!(
            source.fetch_user_count("demo"),
            Err(ScrapeError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_user_count_without_label_is_zero() {
        let stub = StubFetch::default().with("http://hub.test/p/demo/users", "<p>nobody</p>");
        let source = OpenHub::new(&stub, &config());

        assert_eq!(source.fetch_user_count("demo").unwrap(), 0);
        assert_eq!(stub.requested.borrow().len(), 1);
    }

    #[test]
    fn test_fetch_project_uses_api_key() {
        let stub = StubFetch::default().with(
            "http://hub.test/p/demo.xml?api_key=KEY&v=1",
            "<response><result><project><id>9</id></project></result></response>",
        );
        let source = OpenHub::new(&stub, &config());

        assert_eq!(source.fetch_project("demo").unwrap().id, "9");
    }

    #[test]
    fn test_fetch_errors_propagate() {
        let source = OpenHub::new(StubFetch::default(), &config());

        assert!(matches!(
            source.fetch_repo_stats("demo"),
            Err(ScrapeError::Status { status: 404, .. })
        ));
        assert!(source.fetch_enlistments("demo").is_err());
        assert!(source.fetch_language_locs("demo").is_err());
    }
}
