//! HTTP transport and OpenHub endpoint addresses.
//!
//! All network access goes through the [`Fetch`] trait so the scrapers can be
//! exercised against canned pages. [`HttpClient`] is the production
//! implementation on top of `reqwest`'s blocking client: one request at a time,
//! each fully read before the next is issued.

use reqwest::Url;
use reqwest::blocking::Client;
use tracing::debug;

use crate::error::ScrapeError;

/// Default upstream base URL.
pub const DEFAULT_BASE_URL: &str = "https://www.openhub.net";

/// Default `User-Agent` header sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("openhub-scrape/", env!("CARGO_PKG_VERSION"));

/// Something that can GET a URL and return the response body as text.
pub trait Fetch {
    /// Fetch `url` and return its body.
    ///
    /// # Errors
    ///
    /// Implementations return [`ScrapeError::Http`] on transport failures and
    /// [`ScrapeError::Status`] when the server does not answer with a success
    /// status code.
    fn get(&self, url: &str) -> Result<String, ScrapeError>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn get(&self, url: &str) -> Result<String, ScrapeError> {
        (**self).get(url)
    }
}

/// Blocking HTTP client used for real runs.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Build a client sending the given `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str) -> Result<String, ScrapeError> {
        debug!(url = %redact(url), "GET");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScrapeError::Http(e.without_url()))?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: redact(url),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .map_err(|e| ScrapeError::Http(e.without_url()))
    }
}

/// Hide the value of the `api_key` query parameter so it never ends up in logs.
#[must_use]
pub fn redact(url: &str) -> String {
    let Some(start) = url.find("api_key=").map(|i| i + "api_key=".len()) else {
        return url.to_string();
    };
    let end = url[start..].find('&').map_or(url.len(), |i| start + i);

    format!("{}***{}", &url[..start], &url[end..])
}

/// Builds the URLs of the OpenHub resources used by the scrapers.
#[derive(Clone, Debug)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Create endpoints rooted at `base_url` (a trailing `/` is ignored).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /p/<id>.xml?api_key=..&v=1`
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidUrl`] if the base URL is not a valid URL.
    pub fn project_xml(&self, project: &str, api_key: &str) -> Result<String, ScrapeError> {
        self.api_url(&format!("/p/{project}.xml"), api_key)
    }

    /// `GET /p/<id>/enlistments.xml?api_key=..&v=1`
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidUrl`] if the base URL is not a valid URL.
    pub fn enlistments_xml(&self, project: &str, api_key: &str) -> Result<String, ScrapeError> {
        self.api_url(&format!("/p/{project}/enlistments.xml"), api_key)
    }

    /// HTML listing of the project's users, first page.
    #[must_use]
    pub fn users(&self, project: &str) -> String {
        format!("{}/p/{project}/users", self.base_url)
    }

    /// HTML listing of the project's users, page `page`.
    #[must_use]
    pub fn users_page(&self, project: &str, page: u64) -> String {
        format!("{}/p/{project}/users?page={page}", self.base_url)
    }

    /// HTML table of code lines per language.
    #[must_use]
    pub fn languages_summary(&self, project: &str) -> String {
        format!(
            "{}/p/{project}/analyses/latest/languages_summary",
            self.base_url
        )
    }

    /// HTML commit summary page.
    #[must_use]
    pub fn commits_summary(&self, project: &str) -> String {
        format!("{}/projects/{project}/commits/summary", self.base_url)
    }

    fn api_url(&self, path: &str, api_key: &str) -> Result<String, ScrapeError> {
        let raw = format!("{}{path}", self.base_url);
        Url::parse_with_params(&raw, &[("api_key", api_key), ("v", "1")])
            .map(String::from)
            .map_err(|e| ScrapeError::InvalidUrl(format!("{raw}: {e}")))
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_xml_url_encodes_key() {
        let endpoints = Endpoints::default();
        let url = endpoints.project_xml("firefox", "a b&c").unwrap();

        assert_eq!(
            url,
            "https://www.openhub.net/p/firefox.xml?api_key=a+b%26c&v=1"
        );
    }

    #[test]
    fn test_html_urls() {
        let endpoints = Endpoints::new("http://localhost:8080/");

        assert_eq!(endpoints.users("x"), "http://localhost:8080/p/x/users");
        assert_eq!(
            endpoints.users_page("x", 3),
            "http://localhost:8080/p/x/users?page=3"
        );
        assert_eq!(
            endpoints.languages_summary("x"),
            "http://localhost:8080/p/x/analyses/latest/languages_summary"
        );
        assert_eq!(
            endpoints.commits_summary("x"),
            "http://localhost:8080/projects/x/commits/summary"
        );
    }

    #[test]
    fn test_enlistments_url() {
        let url = Endpoints::new("http://h").enlistments_xml("x", "k").unwrap();
        assert_eq!(url, "http://h/p/x/enlistments.xml?api_key=k&v=1");
    }

    #[test]
    fn test_invalid_base_url() {
        let endpoints = Endpoints::new("not a url");
        assert!(matches!(
            endpoints.project_xml("x", "k"),
            Err(ScrapeError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_redact() {
        assert_eq!(
            redact("http://h/p/x.xml?api_key=secret&v=1"),
            "http://h/p/x.xml?api_key=***&v=1"
        );
        assert_eq!(redact("http://h/p/x.xml?api_key=secret"), "http://h/p/x.xml?api_key=***");
        assert_eq!(redact("http://h/p/x/users"), "http://h/p/x/users");
    }

    #[test]
    fn test_transport_error_hides_api_key() {
        let client = HttpClient::new("openhub-scrape-test").unwrap();
        let err = client
            .get("http://127.0.0.1:1/p/x.xml?api_key=SECRETKEY&v=1")
            .unwrap_err();

        assert!(matches!(err, ScrapeError::Http(_)));
        assert!(!err.to_string().contains("SECRETKEY"));
    }
}
