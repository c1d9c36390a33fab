//! # openhub-scrape
//!
//! Collects metadata about FOSS projects from OpenHub and prints it as CSV.
//!
//! For every project identifier in an input list, the library fetches the
//! project XML document from the OpenHub API, keeps the project only if one of
//! its tags matches the configured pattern, and completes the row with data
//! scraped from the project's web pages (user count, lines of code per
//! language, commit statistics and repository URLs).
//!
//! The pieces are layered so each can be tested without the network:
//!
//! - [`client`] issues HTTP requests behind the [`client::Fetch`] trait
//! - [`extract`] turns XML and HTML bodies into something queryable
//! - [`source`] knows OpenHub's pages and produces typed values
//! - [`builder`] assembles one [`project::OutputRow`] per project
//! - [`driver`] walks the project list and writes CSV through [`output`]

pub mod builder;
pub mod cli;
pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod extract;
pub mod output;
pub mod project;
pub mod source;
