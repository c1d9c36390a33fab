//! Project data structures.
//!
//! This module contains the in-memory records built while processing one
//! project identifier. They live only until that project's row is written.
//!
//! ## Main Parts
//!
//! - [`ProjectMetadata`] - Fields read from the project XML document
//! - [`LanguageLocs`] - Line counts bucketed into the recognized languages
//! - [`RepoStats`] - Commit statistics scraped from the commit summary page
//! - [`OutputRow`] - The flat record emitted for a matching project

pub mod languages;
pub mod metadata;
pub mod repo;
pub mod row;

pub use languages::{LanguageLocs, RECOGNIZED_LANGUAGES};
pub use metadata::ProjectMetadata;
pub use repo::{RepoStats, join_urls};
pub use row::{ExtendedFields, Indicators, OutputRow, headers};
