//! Command-line interface definition.
//!
//! Every option is optional; missing values fall back to the configuration
//! file and then to the built-in defaults.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::client::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::config::file::expand_tilde;
use crate::config::{DEFAULT_KEY_FILE, FileConfig, OutputSchema, RunConfig, TagFilter};

/// Default location of the project list.
pub const DEFAULT_INPUT_FILE: &str = "./input/foss-projects.txt";

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input file with FOSS project names to extract, one per line
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// File whose first line is the OpenHub API key
    #[arg(short = 'k', long)]
    key_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FilterArgs {
    /// Get only projects that have a tag containing this pattern (case-insensitive)
    #[arg(short = 't', long = "tag")]
    tag: Option<String>,
}

#[derive(Parser, Debug)]
struct OutputArgs {
    /// Columns to write for each project
    #[arg(short = 's', long, value_enum)]
    schema: Option<OutputSchema>,

    /// Log every request and skipped project
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct HttpArgs {
    /// Base URL of the OpenHub service
    #[arg(long)]
    base_url: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long)]
    user_agent: Option<String>,
}

#[derive(Parser, Debug)]
#[command(name = "openhub-scrape")]
#[command(about = "Collect OpenHub metadata for a list of FOSS projects and print it as CSV")]
pub struct Cli {
    /// Input options
    #[command(flatten)]
    input: InputArgs,

    /// Tag filtering options
    #[command(flatten)]
    filter: FilterArgs,

    /// Output options
    #[command(flatten)]
    output: OutputArgs,

    /// HTTP options
    #[command(flatten)]
    http: HttpArgs,
}

impl Cli {
    /// Project list path: CLI, then config file, then the default.
    #[must_use]
    pub fn input(&self, file: &FileConfig) -> PathBuf {
        self.input
            .input
            .clone()
            .or_else(|| file.input.as_deref().map(expand_tilde))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_FILE))
    }

    /// API key path: CLI, then config file, then the default.
    #[must_use]
    pub fn key_file(&self, file: &FileConfig) -> PathBuf {
        self.input
            .key_file
            .clone()
            .or_else(|| file.key_file.as_deref().map(expand_tilde))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_FILE))
    }

    /// Tag pattern, if any was given.
    #[must_use]
    pub fn tag(&self, file: &FileConfig) -> Option<String> {
        self.filter.tag.clone().or_else(|| file.tag.clone())
    }

    /// Output schema: CLI, then config file, then extended.
    #[must_use]
    pub fn schema(&self, file: &FileConfig) -> OutputSchema {
        self.output.schema.or(file.schema).unwrap_or_default()
    }

    /// Upstream base URL.
    #[must_use]
    pub fn base_url(&self, file: &FileConfig) -> String {
        self.http
            .base_url
            .clone()
            .or_else(|| file.http.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self, file: &FileConfig) -> String {
        self.http
            .user_agent
            .clone()
            .or_else(|| file.http.user_agent.clone())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
    }

    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.output.verbose
    }

    /// Assemble the per-run configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag pattern is not a valid regular expression.
    pub fn run_config(&self, file: &FileConfig, api_key: String) -> Result<RunConfig> {
        Ok(RunConfig {
            api_key,
            tag_filter: TagFilter::new(self.tag(file).as_deref())?,
            schema: self.schema(file),
            base_url: self.base_url(file),
        })
    }
}
