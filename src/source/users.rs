//! Corrected user count from the paginated `/p/<id>/users` listing.
//!
//! The `user_count` field of the XML API is unreliable, so the count is
//! recomputed from the HTML listing: the pagination label gives the number of
//! pages, and the avatars on the last page give the remainder.

use tracing::debug;

use crate::client::{Endpoints, Fetch};
use crate::error::ScrapeError;
use crate::extract::html::{elements_named, last_number};

/// Users shown per listing page.
pub const USERS_PER_PAGE: u64 = 10;

/// Number of listing pages announced by the `paginate` label.
///
/// Returns `Ok(None)` when the page has no such label.
///
/// # Errors
///
/// Returns [`ScrapeError::MissingElement`] when the label has no digits.
pub fn page_count(html: &str) -> Result<Option<u64>, ScrapeError> {
    let Some(label) = elements_named(html, "label")
        .into_iter()
        .find(|l| l.has_class("paginate"))
    else {
        return Ok(None);
    };

    let text = label.text();
    last_number(&text)
        .map(Some)
        .ok_or_else(|| ScrapeError::missing(format!("a page count in '{text}'"), "users listing"))
}

/// Number of avatar entries on a listing page.
#[must_use]
pub fn count_avatars(html: &str) -> u64 {
    elements_named(html, "div")
        .iter()
        .filter(|div| div.has_class("avatar"))
        .count() as u64
}

/// Total users assuming full pages except possibly the last one.
///
/// Returns `None` when the total does not fit in a `u64`.
#[must_use]
pub const fn total_users(pages: u64, last_page_avatars: u64) -> Option<u64> {
    match pages.saturating_sub(1).checked_mul(USERS_PER_PAGE) {
        Some(full) => full.checked_add(last_page_avatars),
        None => None,
    }
}

/// Fetch the listing and compute the user count of `project`.
pub(crate) fn fetch_user_count<F: Fetch>(
    fetch: &F,
    endpoints: &Endpoints,
    project: &str,
) -> Result<u64, ScrapeError> {
    let first = fetch.get(&endpoints.users(project))?;

    let Some(pages) = page_count(&first)? else {
        debug!(project, "no pagination label, assuming zero users");
        return Ok(0);
    };

    let last = fetch.get(&endpoints.users_page(project, pages))?;
    let avatars = count_avatars(&last);
    debug!(project, pages, avatars, "counted users");

    total_users(pages, avatars).ok_or_else(|| ScrapeError::InvalidNumber {
        value: pages.to_string(),
        context: "users listing page count".to_string(),
    })
}
