//! Document extraction helpers.
//!
//! - [`xml`] - element tree and path lookups for the XML API responses
//! - [`html`] - tag/class/text helpers for the scraped HTML pages

pub mod html;
pub mod xml;

pub use xml::{Element, NOT_AVAILABLE, XmlDocument};
