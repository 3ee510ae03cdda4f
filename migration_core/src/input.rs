//! Reading CSV exports.
//!
//! Input is a `SHOW ...` result exported as CSV: the first row names the
//! columns, every other row is one object.

use std::io::Read;

use anyhow::{Context, Result};

/// Header row followed by data rows.
pub type CsvGrid = Vec<Vec<String>>;

/// Read the whole input as CSV.
///
/// Every row must have as many cells as the header; ragged input is an error.
pub fn read_csv<R: Read>(reader: R) -> Result<CsvGrid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(reader);

    reader
        .records()
        .enumerate()
        .map(|(i, record)| {
            record
                .map(|r| r.iter().map(str::to_owned).collect())
                .with_context(|| format!("failed to read CSV record {}", i + 1))
        })
        .collect()
}

/// Decode the backslash escapes Snowflake applies to exported text values.
///
/// `\n`, `\r` and `\t` become the control characters, `\\` a single
/// backslash and `\"` a double quote. Anything else is kept verbatim.
pub fn unescape_csv_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    #[test]
    fn reads_header_and_rows() -> Result<()> {
        let grid = read_csv("name,comment\nA,\"with, comma\"\nB,\n".as_bytes())?;
        assert_eq!(
            grid,
            vec![
                vec!["name".to_owned(), "comment".to_owned()],
                vec!["A".to_owned(), "with, comma".to_owned()],
                vec!["B".to_owned(), "".to_owned()],
            ]
        );
        Ok(())
    }

    #[test]
    fn empty_input_is_an_empty_grid() -> Result<()> {
        assert!(read_csv("".as_bytes())?.is_empty());
        Ok(())
    }

    #[test]
    fn ragged_rows_fail() {
        assert!(read_csv("name,comment\nA\n".as_bytes()).is_err());
    }

    #[test]
    fn unescapes_control_sequences() {
        assert_eq!(unescape_csv_value(r"a\nb"), "a\nb");
        assert_eq!(unescape_csv_value(r"a\rb"), "a\rb");
        assert_eq!(unescape_csv_value(r"a\tb"), "a\tb");
        assert_eq!(unescape_csv_value(r"a\\b"), "a\\b");
        assert_eq!(unescape_csv_value(r#"say \"hi\""#), "say \"hi\"");
    }

    #[test]
    fn escaped_backslash_before_n_is_not_a_newline() {
        assert_eq!(unescape_csv_value(r"a\\nb"), r"a\nb");
        assert_eq!(unescape_csv_value(r"\\\n"), "\\\n");
    }

    #[test]
    fn unknown_and_dangling_escapes_are_kept() {
        assert_eq!(unescape_csv_value(r"a\qb"), r"a\qb");
        assert_eq!(unescape_csv_value("trailing\\"), "trailing\\");
        assert_eq!(unescape_csv_value("plain"), "plain");
    }
}
