//! Core project metadata read from the `/p/<id>.xml` API document.

use chrono::{DateTime, Datelike, NaiveDate};

use crate::config::TagFilter;
use crate::error::ScrapeError;
use crate::extract::XmlDocument;

const PROJECT: &str = "result/project";

/// Fields of one project as reported by the XML API.
///
/// Fields absent from the document hold the `"N/A"` sentinel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub id: String,
    pub name: String,
    pub homepage_url: String,
    pub twelve_month_contributors: String,
    pub twelve_month_commits: String,
    pub main_language: String,
    pub activity: String,
    pub activity_index: String,
    pub first_commit_month: String,
    pub last_commit_month: String,

    /// Factoid texts without commas, each followed by `" - "`
    pub factoids: String,

    /// Tags in document order
    pub tags: Vec<String>,

    /// Message of the `error` element, when the API answered with one
    pub error: Option<String>,
}

impl ProjectMetadata {
    /// Read the metadata out of a project document.
    #[must_use]
    pub fn from_xml(doc: &XmlDocument) -> Self {
        let field = |path: &str| doc.find_text(&format!("{PROJECT}/{path}"));

        let tags = doc
            .find_all(&format!("{PROJECT}/tags/tag"))
            .into_iter()
            .map(|tag| tag.text.clone())
            .collect();

        let factoids = doc
            .find(&format!("{PROJECT}/analysis/factoids"))
            .map(|node| {
                node.descendants("factoid")
                    .iter()
                    .map(|f| format!("{} - ", f.text.replace(',', "").trim_matches(['\r', '\n', '\t'])))
                    .collect::<String>()
            })
            .unwrap_or_default();

        Self {
            id: field("id"),
            name: field("name"),
            homepage_url: field("homepage_url"),
            twelve_month_contributors: field("analysis/twelve_month_contributor_count"),
            twelve_month_commits: field("analysis/twelve_month_commit_count"),
            main_language: field("analysis/main_language_name"),
            activity: field("project_activity_index/description"),
            activity_index: field("project_activity_index/value"),
            first_commit_month: field("analysis/min_month"),
            last_commit_month: field("analysis/max_month"),
            factoids,
            tags,
            error: doc.find("error").map(|e| e.text.clone()),
        }
    }

    /// The first tag accepted by `filter`, scanning tags in document order.
    #[must_use]
    pub fn first_matching_tag(&self, filter: &TagFilter) -> Option<&str> {
        self.tags
            .iter()
            .map(String::as_str)
            .find(|tag| filter.matches(tag))
    }

    /// Whole years between the first and the last commit month.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidDate`] if either month cannot be parsed.
    pub fn years_active(&self) -> Result<i32, ScrapeError> {
        Ok(parse_year(&self.last_commit_month)? - parse_year(&self.first_commit_month)?)
    }
}

/// Extract the year of a month string such as `2010-03`, `2010-03-01` or
/// `2010-03-01T00:00:00Z`.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidDate`] when none of the formats match.
pub fn parse_year(month: &str) -> Result<i32, ScrapeError> {
    let month = month.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(month) {
        return Ok(dt.year());
    }

    NaiveDate::parse_from_str(month, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d"))
        .map(|date| date.year())
        .map_err(|_| ScrapeError::InvalidDate(month.to_string()))
}
