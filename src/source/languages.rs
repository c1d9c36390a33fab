//! Code lines per language from the `languages_summary` analysis page.

use tracing::debug;

use crate::client::{Endpoints, Fetch};
use crate::error::ScrapeError;
use crate::extract::html::{elements, elements_named, strip_tags};
use crate::project::LanguageLocs;

const PAGE: &str = "languages summary";

/// Marker of the language table's opening tag.
const TABLE_MARKER: &str = "language_breakdown";

/// Language name and code line count of every data row of the language table.
///
/// Rows carrying a `class` attribute are header or footer rows and are
/// skipped. Rows with fewer than two cells hold no count and are skipped with
/// a debug log.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidNumber`] if a line count is not an integer.
pub fn language_rows(html: &str) -> Result<Vec<(String, u64)>, ScrapeError> {
    let tables = elements_named(html, "table");
    let table = tables
        .iter()
        .find(|t| t.attrs.contains(TABLE_MARKER))
        .or_else(|| tables.first())
        .map_or(html, |t| t.inner);

    let mut rows = Vec::new();

    for row in elements_named(table, "tr") {
        if row.has_class_attr() {
            continue;
        }

        let cells = elements(row.inner, &["td", "th"]);
        let [name, count, ..] = cells.as_slice() else {
            debug!(row = %strip_tags(row.inner), "language row without a line count, skipping");
            continue;
        };

        let raw = count.text();
        let lines = raw
            .replace(',', "")
            .parse::<u64>()
            .map_err(|_| ScrapeError::InvalidNumber {
                value: raw.clone(),
                context: format!("{PAGE} row '{}'", name.text()),
            })?;

        rows.push((name.text(), lines));
    }

    Ok(rows)
}

/// Bucket raw rows into the recognized languages and the rest.
#[must_use]
pub fn aggregate(rows: &[(String, u64)]) -> LanguageLocs {
    let mut locs = LanguageLocs::new();
    for (language, lines) in rows {
        locs.record(language, *lines);
    }
    locs
}

pub(crate) fn fetch_language_locs<F: Fetch>(
    fetch: &F,
    endpoints: &Endpoints,
    project: &str,
) -> Result<LanguageLocs, ScrapeError> {
    let html = fetch.get(&endpoints.languages_summary(project))?;
    Ok(aggregate(&language_rows(&html)?))
}
