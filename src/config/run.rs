//! Per-run configuration handed to the row builder.
//!
//! Everything the pipeline needs that is decided at startup (API key, tag
//! filter, schema, upstream address) lives in [`RunConfig`]; nothing is read
//! from global state.

use anyhow::{Context, Result};
use regex::Regex;

use crate::client::DEFAULT_BASE_URL;

use super::OutputSchema;

/// Case-insensitive tag predicate.
///
/// The user pattern is wrapped as `.*<pattern>.*`, so it matches any tag that
/// contains it. Without a pattern every tag matches.
#[derive(Clone, Debug)]
pub struct TagFilter {
    regex: Regex,
}

impl TagFilter {
    /// Compile the filter for `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid regular expression.
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let inner = pattern.filter(|p| !p.is_empty()).unwrap_or(".*");
        let regex = Regex::new(&format!("(?i).*{inner}.*"))
            .with_context(|| format!("Invalid tag pattern '{inner}'"))?;

        Ok(Self { regex })
    }

    /// Whether `tag` is accepted.
    #[must_use]
    pub fn matches(&self, tag: &str) -> bool {
        self.regex.is_match(tag)
    }

    /// The compiled expression, for display.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Settings shared by every project of one run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// OpenHub API key
    pub api_key: String,

    /// Which tags make a project eligible for output
    pub tag_filter: TagFilter,

    /// Output columns
    pub schema: OutputSchema,

    /// Upstream base URL
    pub base_url: String,
}

impl RunConfig {
    /// A configuration with the default schema, base URL and an accept-all
    /// tag filter.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the default filter is always valid.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            tag_filter: TagFilter::new(None)?,
            schema: OutputSchema::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_filter_default_matches_everything() {
        let filter = TagFilter::new(None).unwrap();

        assert!(filter.matches("anything"));
        assert!(filter.matches(""));
        assert_eq!(filter.as_str(), "(?i).*.*.*");
    }

    #[test]
    fn test_tag_filter_is_case_insensitive_substring() {
        let filter = TagFilter::new(Some("java")).unwrap();

        assert!(filter.matches("Java"));
        assert!(filter.matches("javascript"));
        assert!(filter.matches("enterprise-JAVA-beans"));
        assert!(!filter.matches("python"));
    }

    #[test]
    fn test_tag_filter_keeps_regex_syntax() {
        let filter = TagFilter::new(Some("^c$|c\\+\\+")).unwrap();

        assert!(filter.matches("C++"));
        assert!(!filter.matches("ruby"));
    }

    #[test]
    fn test_tag_filter_invalid_pattern() {
        assert!(TagFilter::new(Some("(unclosed")).is_err());
    }

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::new("key").unwrap();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.schema, OutputSchema::Extended);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
