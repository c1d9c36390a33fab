//! Configuration types and options for the application.
//!
//! This module contains the configuration structures used throughout the
//! application: the optional TOML file, the output schema and the per-run
//! settings handed to the row builder.

pub mod file;
pub mod key;
pub mod run;
pub mod schema;

pub use file::FileConfig;
pub use key::{DEFAULT_KEY_FILE, read_api_key};
pub use run::{RunConfig, TagFilter};
pub use schema::OutputSchema;
