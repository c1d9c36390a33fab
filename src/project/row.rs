//! The flat output record emitted for each matching project.
//!
//! A row always carries the basic columns. The extended schema appends the
//! language breakdown, the derived indicators and the repository data.

use crate::config::OutputSchema;

use super::{LanguageLocs, ProjectMetadata, RepoStats};

/// Columns of the basic schema.
pub const BASIC_HEADERS: [&str; 12] = [
    "ID",
    "NAME",
    "WEBSITE",
    "USER_COUNT",
    "YEAR_CONTRIBUTORS",
    "YEAR_COMMITS",
    "MAIN_LANGUAGE",
    "ACTIVITY",
    "ACTIVITY_INDX",
    "FIRST_COMMIT",
    "MOST_RECENT_COMMIT",
    "FACTOIDS",
];

/// Columns appended by the extended schema.
pub const EXTENDED_HEADERS: [&str; 19] = [
    "MATCHED_TAG",
    "JAVA_LOC",
    "C_LOC",
    "CPP_LOC",
    "PHP_LOC",
    "JAVASCRIPT_LOC",
    "SQL_LOC",
    "OTHER_LOC",
    "NO_MANAGED_LANG",
    "SCRIPTING_LANG",
    "UNPOPULAR_MAIN_LANG",
    "HAS_UNPOPULAR_LANG",
    "YEARS",
    "REPOSITORIES",
    "CONTRIBUTORS",
    "COMMITS",
    "LINES_ADDED",
    "LINES_REMOVED",
    "FILES_MODIFIED",
];

/// Header row for `schema`.
#[must_use]
pub fn headers(schema: OutputSchema) -> Vec<&'static str> {
    match schema {
        OutputSchema::Basic => BASIC_HEADERS.to_vec(),
        OutputSchema::Extended => BASIC_HEADERS
            .iter()
            .chain(EXTENDED_HEADERS.iter())
            .copied()
            .collect(),
    }
}

/// Boolean indicators derived from the language table and the main language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Indicators {
    /// C or C++ code present
    pub no_managed_lang: bool,

    /// PHP or JavaScript code present
    pub scripting_lang: bool,

    /// Declared main language is not one of the recognized languages
    pub unpopular_main_lang: bool,

    /// Code in a language outside the recognized set present
    pub has_unpopular_lang: bool,
}

impl Indicators {
    #[must_use]
    pub fn derive(locs: &LanguageLocs, main_language: &str) -> Self {
        Self {
            no_managed_lang: locs.has_unmanaged_code(),
            scripting_lang: locs.has_scripting_code(),
            unpopular_main_lang: !LanguageLocs::is_recognized(main_language),
            has_unpopular_lang: locs.has_unpopular_code(),
        }
    }
}

/// Columns only present in the extended schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedFields {
    pub matched_tag: String,
    pub locs: LanguageLocs,
    pub indicators: Indicators,
    pub years: i32,
    pub repositories: String,
    pub stats: RepoStats,
}

/// One output record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputRow {
    pub metadata: ProjectMetadata,
    pub user_count: u64,
    pub extended: Option<ExtendedFields>,
}

impl OutputRow {
    /// The schema this row was built for.
    #[must_use]
    pub const fn schema(&self) -> OutputSchema {
        if self.extended.is_some() {
            OutputSchema::Extended
        } else {
            OutputSchema::Basic
        }
    }

    /// Field values in column order, matching [`headers`] for [`Self::schema`].
    #[must_use]
    pub fn to_record(&self) -> Vec<String> {
        let m = &self.metadata;
        let mut record = vec![
            m.id.clone(),
            m.name.clone(),
            m.homepage_url.clone(),
            self.user_count.to_string(),
            m.twelve_month_contributors.clone(),
            m.twelve_month_commits.clone(),
            m.main_language.clone(),
            m.activity.clone(),
            m.activity_index.clone(),
            m.first_commit_month.clone(),
            m.last_commit_month.clone(),
            m.factoids.clone(),
        ];

        if let Some(ext) = &self.extended {
            record.push(ext.matched_tag.clone());
            record.extend(ext.locs.iter().map(|(_, lines)| lines.to_string()));
            record.push(ext.locs.bucket().to_string());
            record.extend(
                [
                    ext.indicators.no_managed_lang,
                    ext.indicators.scripting_lang,
                    ext.indicators.unpopular_main_lang,
                    ext.indicators.has_unpopular_lang,
                ]
                .map(|flag| u8::from(flag).to_string()),
            );
            record.push(ext.years.to_string());
            record.push(ext.repositories.clone());
            record.extend([
                ext.stats.contributors.clone(),
                ext.stats.commits.clone(),
                ext.stats.lines_added.clone(),
                ext.stats.lines_removed.clone(),
                ext.stats.files_modified.clone(),
            ]);
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locs() -> LanguageLocs {
        let mut locs = LanguageLocs::new();
        locs.record("Java", 1000);
        locs.record("C", 10);
        locs.record("Python", 5);
        locs
    }

    fn basic_row() -> OutputRow {
        OutputRow {
            metadata: ProjectMetadata {
                id: "1".to_string(),
                name: "demo".to_string(),
                main_language: "Java".to_string(),
                ..ProjectMetadata::default()
            },
            user_count: 12,
            extended: None,
        }
    }

    #[test]
    fn test_indicators_main_language() {
        assert!(Indicators::derive(&locs(), "Python").unpopular_main_lang);
        assert!(!Indicators::derive(&locs(), "Java").unpopular_main_lang);
    }

    #[test]
    fn test_indicators_from_locs() {
        let indicators = Indicators::derive(&locs(), "Java");

        assert!(indicators.no_managed_lang);
        assert!(!indicators.scripting_lang);
        assert!(indicators.has_unpopular_lang);
    }

    #[test]
    fn test_basic_record_matches_headers() {
        let row = basic_row();
        let record = row.to_record();

        assert_eq!(row.schema(), OutputSchema::Basic);
        assert_eq!(record.len(), headers(OutputSchema::Basic).len());
        assert_eq!(record[3], "12");
    }

    #[test]
    fn test_extended_record_matches_headers() {
        let mut row = basic_row();
        row.extended = Some(ExtendedFields {
            matched_tag: "java".to_string(),
            locs: locs(),
            indicators: Indicators::derive(&locs(), "Java"),
            years: 5,
            repositories: "git://a git://b".to_string(),
            stats: RepoStats {
                contributors: "3".to_string(),
                commits: "1,024".to_string(),
                ..RepoStats::default()
            },
        });

        let header = headers(OutputSchema::Extended);
        let record = row.to_record();
        let value = |column: &str| {
            let idx = header.iter().position(|h| *h == column).unwrap();
            record[idx].clone()
        };

        assert_eq!(row.schema(), OutputSchema::Extended);
        assert_eq!(record.len(), header.len());
        assert_eq!(value("MATCHED_TAG"), "java");
        assert_eq!(value("JAVA_LOC"), "1000");
        assert_eq!(value("C_LOC"), "10");
        assert_eq!(value("OTHER_LOC"), "5");
        assert_eq!(value("NO_MANAGED_LANG"), "1");
        assert_eq!(value("SCRIPTING_LANG"), "0");
        assert_eq!(value("UNPOPULAR_MAIN_LANG"), "0");
        assert_eq!(value("HAS_UNPOPULAR_LANG"), "1");
        assert_eq!(value("YEARS"), "5");
        assert_eq!(value("REPOSITORIES"), "git://a git://b");
        assert_eq!(value("COMMITS"), "1,024");
    }
}
