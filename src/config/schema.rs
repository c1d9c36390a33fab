//! Output schema selection.

use clap::ValueEnum;
use serde::Deserialize;

/// Which set of columns is written for each project.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputSchema {
    /// Core API metadata and the corrected user count
    Basic,

    /// Basic columns plus language line counts, derived indicators,
    /// repository URLs and commit statistics
    #[default]
    Extended,
}

impl OutputSchema {
    /// Whether the language, enlistment and commit scrapers must run.
    #[must_use]
    pub const fn needs_repository_data(self) -> bool {
        matches!(self, Self::Extended)
    }
}
