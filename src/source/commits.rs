//! Aggregate commit statistics from the `/projects/<id>/commits/summary` page.

use crate::client::{Endpoints, Fetch};
use crate::error::ScrapeError;
use crate::extract::html::{HtmlElement, elements};
use crate::project::RepoStats;

const PAGE: &str = "commit summary";

pub const CONTRIBUTORS_LABEL: &str = "Contributors:";
pub const COMMITS_LABEL: &str = "Commits:";
pub const LINES_ADDED_LABEL: &str = "Lines Added:";
pub const LINES_REMOVED_LABEL: &str = "Lines Removed:";
pub const FILES_MODIFIED_LABEL: &str = "Files Modified:";

/// Text of the cell right after the cell whose text is exactly `label`.
///
/// # Errors
///
/// Returns [`ScrapeError::MissingElement`] if no cell carries the label or the
/// label cell is the last one on the page.
pub fn labeled_value(cells: &[HtmlElement<'_>], label: &str) -> Result<String, ScrapeError> {
    cells
        .iter()
        .position(|cell| cell.text() == label)
        .and_then(|idx| cells.get(idx + 1))
        .map(HtmlElement::text)
        .ok_or_else(|| ScrapeError::missing(format!("label '{label}'"), PAGE))
}

/// Read all five statistics from a commit summary page.
///
/// # Errors
///
/// Fails on the first label that cannot be found.
pub fn parse_repo_stats(html: &str) -> Result<RepoStats, ScrapeError> {
    let cells = elements(html, &["td", "th"]);

    Ok(RepoStats {
        contributors: labeled_value(&cells, CONTRIBUTORS_LABEL)?,
        commits: labeled_value(&cells, COMMITS_LABEL)?,
        lines_added: labeled_value(&cells, LINES_ADDED_LABEL)?,
        lines_removed: labeled_value(&cells, LINES_REMOVED_LABEL)?,
        files_modified: labeled_value(&cells, FILES_MODIFIED_LABEL)?,
    })
}

pub(crate) fn fetch_repo_stats<F: Fetch>(
    fetch: &F,
    endpoints: &Endpoints,
    project: &str,
) -> Result<RepoStats, ScrapeError> {
    parse_repo_stats(&fetch.get(&endpoints.commits_summary(project))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = r#"
<table class="table">
  <tr><td class="label">Commits:</td><td>1,024</td></tr>
  <tr><td class="label">Contributors:</td><td>37</td></tr>
  <tr><td class="label">Files Modified:</td><td>2,210</td></tr>
  <tr><td class="label">Lines Added:</td><td>140,301</td></tr>
  <tr><td class="label">Lines Removed:</td><td>60,010</td></tr>
</table>"#;

    #[test]
    fn test_parse_repo_stats_passthrough() {
        let stats = parse_repo_stats(SUMMARY).unwrap();

        assert_eq!(
            stats,
            RepoStats {
                contributors: "37".to_string(),
                commits: "1,024".to_string(),
                lines_added: "140,301".to_string(),
                lines_removed: "60,010".to_string(),
                files_modified: "2,210".to_string(),
            }
        );
    }

    #[test]
    fn test_label_must_match_exactly() {
        let html = "<table><tr><th>Total Commits:</th><td>5</td></tr></table>";
        let cells = elements(html, &["td", "th"]);

        assert!(labeled_value(&cells, COMMITS_LABEL).is_err());
    }

    #[test]
    fn test_missing_label_errors() {
        let html = SUMMARY.replace("Lines Removed:", "Removed:");
        let err = parse_repo_stats(&html).unwrap_err();

        assert!(matches!(err, ScrapeError::MissingElement { .. }));
        assert!(err.to_string().contains("Lines Removed:"));
    }

    #[test]
    fn test_label_in_last_cell_errors() {
        let html = "<table><tr><td>Commits:</td></tr></table>";
        let cells = elements(html, &["td", "th"]);

        assert!(labeled_value(&cells, COMMITS_LABEL).is_err());
    }
}
