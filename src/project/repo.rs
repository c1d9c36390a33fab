//! Repository-level data: enlisted repository URLs and commit statistics.

/// Aggregate commit statistics as shown on the commit summary page.
///
/// Values are kept exactly as displayed (e.g. `"1,204"`); no numeric parsing
/// is applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepoStats {
    pub contributors: String,
    pub commits: String,
    pub lines_added: String,
    pub lines_removed: String,
    pub files_modified: String,
}

/// Join repository URLs into a single space-separated field.
#[must_use]
pub fn join_urls(urls: &[String]) -> String {
    urls.join(" ")
}
