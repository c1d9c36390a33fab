//! Minimal XML element tree and path lookups.
//!
//! The OpenHub API answers with small XML documents. This module reads them
//! with `quick-xml` into an owned tree of [`Element`]s and offers
//! slash-separated path lookups relative to the document root, e.g.
//! `result/project/analysis/main_language_name`.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::ScrapeError;

/// Sentinel returned by [`XmlDocument::find_text`] when a path has no match.
pub const NOT_AVAILABLE: &str = "N/A";

/// An XML element with its direct text content and child elements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    /// Local tag name (namespace prefixes are dropped)
    pub name: String,

    /// Concatenated, trimmed text directly inside this element
    pub text: String,

    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Return every element matching `path`, in document order.
    ///
    /// Each path segment selects the children with that name of every
    /// element selected by the previous segment. An empty path selects
    /// the element itself.
    #[must_use]
    pub fn find_all(&self, path: &str) -> Vec<&Self> {
        let mut candidates = vec![self];

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            candidates = candidates
                .into_iter()
                .flat_map(|el| el.children.iter().filter(move |c| c.name == segment))
                .collect();

            if candidates.is_empty() {
                break;
            }
        }

        candidates
    }

    /// Return the first element matching `path`, if any.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Self> {
        self.find_all(path).into_iter().next()
    }

    /// Return the text of the first element matching `path`, or [`NOT_AVAILABLE`].
    #[must_use]
    pub fn find_text(&self, path: &str) -> String {
        self.find(path)
            .map_or_else(|| NOT_AVAILABLE.to_string(), |el| el.text.clone())
    }

    /// Collect this element and all its descendants named `name`, depth first.
    #[must_use]
    pub fn descendants(&self, name: &str) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect_descendants(name, &mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a Self>) {
        if self.name == name {
            out.push(self);
        }
        for child in &self.children {
            child.collect_descendants(name, out);
        }
    }
}

/// A parsed XML document.
#[derive(Clone, Debug)]
pub struct XmlDocument {
    root: Element,
}

impl XmlDocument {
    /// Parse an XML string into an element tree.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Xml`] when the document is not well formed and
    /// [`ScrapeError::MissingElement`] when it contains no root element.
    pub fn parse(content: &str) -> Result<Self, ScrapeError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    stack.push(Element::new(name));
                }
                Event::Empty(empty) => {
                    let name = String::from_utf8_lossy(empty.local_name().as_ref()).into_owned();
                    attach(&mut stack, &mut root, Element::new(name));
                }
                Event::End(_) => {
                    if let Some(done) = stack.pop() {
                        attach(&mut stack, &mut root, done);
                    }
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let unescaped = text.unescape().map_err(quick_xml::Error::from)?;
                        current.text.push_str(unescaped.trim());
                    }
                }
                Event::CData(cdata) => {
                    if let Some(current) = stack.last_mut() {
                        let raw = cdata.into_inner();
                        current.text.push_str(String::from_utf8_lossy(&raw).trim());
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        root.map(|root| Self { root })
            .ok_or_else(|| ScrapeError::missing("a root element", "XML document"))
    }

    /// Text of the first element matching `path` below the root, or `"N/A"`.
    #[must_use]
    pub fn find_text(&self, path: &str) -> String {
        self.root.find_text(path)
    }

    /// First element matching `path` below the root.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Element> {
        self.root.find(path)
    }

    /// Every element matching `path` below the root.
    #[must_use]
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        self.root.find_all(path)
    }
}

/// Attach a finished element to its parent, or make it the root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
  <status>success</status>
  <result>
    <project>
      <id>42</id>
      <name>Foo &amp; Bar</name>
      <homepage_url></homepage_url>
      <tags>
        <tag>java</tag>
        <tag>web</tag>
      </tags>
      <analysis>
        <main_language_name><![CDATA[C++]]></main_language_name>
      </analysis>
    </project>
  </result>
</response>"#;

    #[test]
    fn test_find_text_returns_first_match() {
        let doc = XmlDocument::parse(PROJECT_XML).unwrap();

        assert_eq!(doc.find_text("result/project/id"), "42");
        assert_eq!(doc.find_text("result/project/tags/tag"), "java");
    }

    #[test]
    fn test_find_text_missing_path_is_sentinel() {
        let doc = XmlDocument::parse(PROJECT_XML).unwrap();

        assert_eq!(doc.find_text("result/project/user_count"), NOT_AVAILABLE);
        assert_eq!(doc.find_text("error"), NOT_AVAILABLE);
    }

    #[test]
    fn test_empty_element_has_empty_text() {
        let doc = XmlDocument::parse(PROJECT_XML).unwrap();
        assert_eq!(doc.find_text("result/project/homepage_url"), "");
    }

    #[test]
    fn test_entities_and_cdata() {
        let doc = XmlDocument::parse(PROJECT_XML).unwrap();

        assert_eq!(doc.find_text("result/project/name"), "Foo & Bar");
        assert_eq!(
            doc.find_text("result/project/analysis/main_language_name"),
            "C++"
        );
    }

    #[test]
    fn test_find_all_keeps_document_order() {
        let doc = XmlDocument::parse(PROJECT_XML).unwrap();
        let tags: Vec<&str> = doc
            .find_all("result/project/tags/tag")
            .iter()
            .map(|t| t.text.as_str())
            .collect();

        assert_eq!(tags, vec!["java", "web"]);
    }

    #[test]
    fn test_find_searches_across_all_candidates() {
        let xml = "<r><a><c>1</c></a><a><b>2</b></a></r>";
        let doc = XmlDocument::parse(xml).unwrap();

        assert_eq!(doc.find_text("a/b"), "2");
    }

    #[test]
    fn test_descendants_includes_nested() {
        let xml = "<r><factoids><factoid>x</factoid><g><factoid>y</factoid></g></factoids></r>";
        let doc = XmlDocument::parse(xml).unwrap();
        let found = doc.find("factoids").unwrap().descendants("factoid");

        assert_eq!(found.len(), 2);
        assert_eq!(found[1].text, "y");
    }

    #[test]
    fn test_self_closing_elements() {
        let doc = XmlDocument::parse("<r><empty/><v>1</v></r>").unwrap();

        assert_eq!(doc.find_text("empty"), "");
        assert_eq!(doc.find_text("v"), "1");
    }

    #[test]
    fn test_malformed_document_errors() {
        assert!(XmlDocument::parse("<r><a></b></r>").is_err());
        assert!(XmlDocument::parse("").is_err());
    }
}
