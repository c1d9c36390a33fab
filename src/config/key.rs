//! API key file loading.

use std::fs;
use std::path::Path;

use tracing::error;

/// Default location of the API key file.
pub const DEFAULT_KEY_FILE: &str = "./key/openhub_key.txt";

/// Read the API key from the first line of `path`.
///
/// Returns `None` when the file does not exist; the caller must stop before
/// any request is made. A file that exists but cannot be read is logged and
/// yields an empty key, so the run still proceeds (every API call will then
/// report an error).
#[must_use]
pub fn read_api_key(path: &Path) -> Option<String> {
    if !path.exists() {
        error!(path = %path.display(), "OpenHub api key file is missing");
        return None;
    }

    match fs::read_to_string(path) {
        Ok(content) => Some(content.lines().next().unwrap_or_default().trim().to_string()),
        Err(e) => {
            error!(path = %path.display(), error = %e, "can't read the api key file");
            Some(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_first_line_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.txt");
        fs::write(&path, "abc123 \nsecond line\n").unwrap();

        assert_eq!(read_api_key(&path).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_empty_file_gives_empty_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.txt");
        fs::write(&path, "").unwrap();

        assert_eq!(read_api_key(&path).as_deref(), Some(""));
    }

    #[test]
    fn test_missing_file_gives_no_key() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(read_api_key(&dir.path().join("nope.txt")), None);
    }

    #[test]
    fn test_unreadable_file_gives_empty_key() {
        let dir = tempfile::tempdir().unwrap();

        // A directory exists but cannot be read as a file.
        assert_eq!(read_api_key(dir.path()).as_deref(), Some(""));
    }
}
