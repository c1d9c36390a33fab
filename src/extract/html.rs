//! Low-level HTML helpers used by the page scrapers.
//!
//! These are regex based and assume the elements they look for (`table`,
//! `tr`, `td`, `label`, `div`) are not nested inside an element of the same
//! kind, which holds for the OpenHub pages we read.
//! Tag and attribute names are matched case-insensitively.

use std::sync::LazyLock;

use regex::Regex;

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<([a-z][a-z0-9]*)\b([^>]*)>").expect("open tag regex is valid")
});

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag regex is valid"));

static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("class attribute regex is valid")
});

static LAST_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\D*$").expect("digits regex is valid"));

/// A matched HTML element: the attribute section of its opening tag and its
/// inner HTML.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HtmlElement<'a> {
    /// Tag name as requested by the caller
    pub tag: &'static str,

    /// Raw attribute text of the opening tag (everything after the tag name)
    pub attrs: &'a str,

    /// Raw HTML between the opening and closing tags
    pub inner: &'a str,
}

impl HtmlElement<'_> {
    /// Visible text of the element: tags removed, entities decoded,
    /// whitespace collapsed.
    #[must_use]
    pub fn text(&self) -> String {
        strip_tags(self.inner)
    }

    /// Whether the element carries a `class` attribute at all.
    #[must_use]
    pub fn has_class_attr(&self) -> bool {
        CLASS_ATTR.is_match(self.attrs)
    }

    /// Whether the element's class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        CLASS_ATTR.captures(self.attrs).is_some_and(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .any(|m| m.as_str().split_whitespace().any(|c| c == class))
        })
    }
}

/// Find every element whose tag is one of `tags`, in document order.
///
/// The inner HTML of an element runs until the next closing tag of the same
/// name. Elements without a closing tag are returned with empty inner HTML.
#[must_use]
pub fn elements<'a>(html: &'a str, tags: &[&'static str]) -> Vec<HtmlElement<'a>> {
    let lower = html.to_ascii_lowercase();
    let mut out = Vec::new();

    for caps in OPEN_TAG.captures_iter(html) {
        let (Some(whole), Some(name), Some(attrs)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };

        let Some(&tag) = tags
            .iter()
            .find(|t| t.eq_ignore_ascii_case(name.as_str()))
        else {
            continue;
        };

        let closing = format!("</{tag}");
        let start = whole.end();
        let inner = lower[start..]
            .find(&closing)
            .map_or("", |rel| &html[start..start + rel]);

        out.push(HtmlElement {
            tag,
            attrs: attrs.as_str(),
            inner,
        });
    }

    out
}

/// Convenience wrapper around [`elements`] for a single tag name.
#[must_use]
pub fn elements_named<'a>(html: &'a str, tag: &'static str) -> Vec<HtmlElement<'a>> {
    elements(html, &[tag])
}

/// Remove all tags, decode the common entities and collapse whitespace.
#[must_use]
pub fn strip_tags(s: &str) -> String {
    let without_tags = ANY_TAG.replace_all(s, " ");
    normalize_ws(&decode_entities(&without_tags))
}

/// Decode the handful of entities that appear in OpenHub markup.
#[must_use]
pub fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapse runs of whitespace into a single space and trim.
#[must_use]
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse the last run of digits in `s`, ignoring thousands separators.
///
/// `"Showing page 1 of 1,021"` yields `Some(1021)`.
#[must_use]
pub fn last_number(s: &str) -> Option<u64> {
    let cleaned = s.replace(',', "");
    LAST_DIGITS
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
