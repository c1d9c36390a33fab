//! Batch processing of a project list.
//!
//! The driver walks the identifiers in input order, asks the [`RowBuilder`]
//! for each row and writes it as soon as it is complete. A failing project is
//! logged and recorded in the [`BatchSummary`]; it never stops the batch.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::builder::RowBuilder;
use crate::output::CsvWriter;
use crate::project::headers;
use crate::source::ProjectSource;

/// A project that could not be processed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectFailure {
    pub project: String,
    pub message: String,
}

/// Outcome counters of a batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Identifiers attempted
    pub processed: usize,

    /// Rows written
    pub written: usize,

    /// Projects without a matching tag
    pub skipped: usize,

    /// Projects that failed, in input order
    pub failures: Vec<ProjectFailure>,
}

impl BatchSummary {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Split file content into project identifiers, one per non-blank line.
#[must_use]
pub fn parse_project_ids(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read the project identifiers listed in `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_project_ids(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read project list at {}", path.display()))?;
    Ok(parse_project_ids(&content))
}

/// Process `projects` in order, writing the header and one CSV row per
/// matching project to `out`.
///
/// # Errors
///
/// Only I/O errors on `out` abort the batch; per-project errors are logged
/// and collected in the returned summary.
pub fn run_batch<S, W>(
    builder: &RowBuilder<S>,
    projects: &[String],
    out: W,
) -> Result<BatchSummary>
where
    S: ProjectSource,
    W: Write,
{
    let mut writer = CsvWriter::new(out);
    writer
        .write(&headers(builder.schema()))
        .context("Failed to write CSV header")?;

    let mut summary = BatchSummary::default();

    for project in projects {
        summary.processed += 1;

        match builder.build(project) {
            Ok(Some(row)) => {
                writer
                    .write(&row.to_record())
                    .with_context(|| format!("Failed to write row for {project}"))?;
                summary.written += 1;
                info!(project = project.as_str(), "row written");
            }
            Ok(None) => summary.skipped += 1,
            Err(e) => {
                error!(
                    project = project.as_str(),
                    error = %e,
                    "can't retrieve data from OpenHub"
                );
                summary.failures.push(ProjectFailure {
                    project: project.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(summary)
}
