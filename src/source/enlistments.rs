//! Repository URLs from the `/p/<id>/enlistments.xml` API document.

use crate::client::{Endpoints, Fetch};
use crate::error::ScrapeError;
use crate::extract::XmlDocument;

/// URLs of every repository of every enlistment, in document order.
#[must_use]
pub fn repository_urls(doc: &XmlDocument) -> Vec<String> {
    doc.find_all("result/enlistment")
        .into_iter()
        .flat_map(|enlistment| enlistment.find_all("repository"))
        .map(|repository| repository.find_text("url"))
        .collect()
}

pub(crate) fn fetch_enlistments<F: Fetch>(
    fetch: &F,
    endpoints: &Endpoints,
    project: &str,
    api_key: &str,
) -> Result<Vec<String>, ScrapeError> {
    let body = fetch.get(&endpoints.enlistments_xml(project, api_key)?)?;
    Ok(repository_urls(&XmlDocument::parse(&body)?))
}
