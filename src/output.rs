//! CSV output.
//!
//! Rows are comma separated with minimal quoting: a field is wrapped in double
//! quotes only when it contains a comma, a quote or a line break, and embedded
//! quotes are doubled.

use std::io::{self, Write};

const SEPARATOR: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains([SEPARATOR, '"', '\n', '\r'])
}

/// Write one CSV record followed by a newline.
///
/// # Errors
///
/// Propagates I/O errors of the underlying writer.
pub fn write_record<W, S>(mut w: W, record: &[S]) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    let line = record
        .iter()
        .map(|field| {
            let field = field.as_ref();
            if needs_quotes(field) {
                format!("\"{}\"", field.replace('"', "\"\""))
            } else {
                field.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string());

    writeln!(w, "{line}")
}

/// CSV writer that only ever emits whole records.
///
/// Each record is written in one call and flushed immediately, so a record is
/// either fully present in the output or not at all.
pub struct CsvWriter<W: Write> {
    inner: W,
}

impl<W: Write> CsvWriter<W> {
    #[must_use]
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write and flush one record.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors of the underlying writer.
    pub fn write<S: AsRef<str>>(&mut self, record: &[S]) -> io::Result<()> {
        write_record(&mut self.inner, record)?;
        self.inner.flush()
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(record: &[&str]) -> String {
        let mut buf = Vec::new();
        write_record(&mut buf, record).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_fields_are_not_quoted() {
        assert_eq!(render(&["1", "foo", "N/A", ""]), "1,foo,N/A,\n");
    }

    #[test]
    fn test_minimal_quoting() {
        assert_eq!(render(&["a,b", "plain"]), "\"a,b\",plain\n");
        assert_eq!(render(&["say \"hi\""]), "\"say \"\"hi\"\"\"\n");
        assert_eq!(render(&["two\nlines"]), "\"two\nlines\"\n");
    }

    #[test]
    fn test_csv_writer_accepts_owned_strings() {
        let mut writer = CsvWriter::new(Vec::new());
        writer.write(&["ID", "NAME"]).unwrap();
        writer
            .write(&vec!["1".to_string(), "x y".to_string()])
            .unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "ID,NAME\n1,x y\n");
    }
}
