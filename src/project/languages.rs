//! Per-language line counts bucketed into the recognized top languages.

/// Languages that get their own column. Everything else lands in the bucket.
pub const RECOGNIZED_LANGUAGES: [&str; 6] = ["Java", "C", "C++", "PHP", "JavaScript", "SQL"];

/// Code line counts for the recognized languages plus a bucket for the rest.
///
/// Every recorded row is counted exactly once, either into its named slot or
/// into the bucket, so the sum of all slots and the bucket always equals the
/// sum of everything recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LanguageLocs {
    counts: [u64; RECOGNIZED_LANGUAGES.len()],
    bucket: u64,
}

impl LanguageLocs {
    /// An empty table, all counts at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `language` has its own slot.
    #[must_use]
    pub fn is_recognized(language: &str) -> bool {
        RECOGNIZED_LANGUAGES.iter().any(|l| *l == language)
    }

    /// Add `lines` to the slot of `language`, or to the bucket when the
    /// language is not recognized.
    pub fn record(&mut self, language: &str, lines: u64) {
        match RECOGNIZED_LANGUAGES.iter().position(|l| *l == language) {
            Some(idx) => self.counts[idx] += lines,
            None => self.bucket += lines,
        }
    }

    /// Line count of a recognized language, `None` for anything else.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<u64> {
        RECOGNIZED_LANGUAGES
            .iter()
            .position(|l| *l == language)
            .map(|idx| self.counts[idx])
    }

    /// Lines of every language outside the recognized set.
    #[must_use]
    pub const fn bucket(&self) -> u64 {
        self.bucket
    }

    /// Recognized languages and their counts, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        RECOGNIZED_LANGUAGES.iter().copied().zip(self.counts.iter().copied())
    }

    /// Sum of all slots and the bucket.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum::<u64>() + self.bucket
    }

    fn count(&self, language: &str) -> u64 {
        self.get(language).unwrap_or(0)
    }

    /// C or C++ code is present.
    #[must_use]
    pub fn has_unmanaged_code(&self) -> bool {
        self.count("C") + self.count("C++") > 0
    }

    /// PHP or JavaScript code is present.
    #[must_use]
    pub fn has_scripting_code(&self) -> bool {
        self.count("PHP") + self.count("JavaScript") > 0
    }

    /// Code in a language outside the recognized set is present.
    #[must_use]
    pub const fn has_unpopular_code(&self) -> bool {
        self.bucket > 0
    }
}
