//! Line scanner that turns a `.vnt` file into a [`Record`].

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use crate::decoder::QUOTED_PRINTABLE;
use crate::error::{Result, VntError};
use crate::model::note::{captured_now, Record};

use super::body::parse_body_field;
use super::timestamp::parse_timestamp;

const BEGIN: &str = "BEGIN:";
const VERSION: &str = "VERSION:";
const BODY: &str = "BODY;";
const DCREATED: &str = "DCREATED:";
const LAST_MODIFIED: &str = "LAST-MODIFIED:";

/// Read and parse one `.vnt` file.
pub fn parse_file(path: &Path) -> Result<Record> {
    let bytes = std::fs::read(path).map_err(|e| VntError::io(path, e))?;
    let text = decode_file_bytes(&bytes);
    debug!(path = %path.display(), bytes = bytes.len(), "Parsing note");
    parse_str(&text)
}

/// Parse the full text of a note.
pub fn parse_str(text: &str) -> Result<Record> {
    parse_lines(text.lines())
}

/// Parse a note from its lines, defaulting missing timestamps to the current time.
pub fn parse_lines<I, S>(lines: I) -> Result<Record>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_lines_with_fallback(lines, captured_now())
}

/// Parse a note from its lines, defaulting missing timestamps to `fallback`.
///
/// Lines are classified by prefix; unknown lines are ignored and a later
/// line for the same field wins. A quoted-printable body ending in a soft
/// line break (`=`) continues on the following lines.
pub fn parse_lines_with_fallback<I, S>(lines: I, fallback: NaiveDateTime) -> Result<Record>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut record = Record::new(fallback);
    let mut lines = lines.into_iter().peekable();

    while let Some(line) = lines.next() {
        let line = line.as_ref();

        if let Some(rest) = line.strip_prefix(BEGIN) {
            record.program = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(VERSION) {
            record.format_version = rest.trim().to_string();
        } else if line.starts_with(BODY) {
            let field = parse_body_field(line)?;
            record.charset = field.charset.to_string();
            record.transfer_encoding = field.transfer_encoding.to_string();
            record.raw_body = field.raw_body.to_string();

            if record.transfer_encoding == QUOTED_PRINTABLE {
                while record.raw_body.ends_with('=') {
                    let Some(next) = lines.next_if(|l| !is_property_line(l.as_ref())) else {
                        break;
                    };
                    record.raw_body.push('\n');
                    record.raw_body.push_str(next.as_ref().trim_end());
                }
            }
        } else if let Some(rest) = line.strip_prefix(DCREATED) {
            record.created = parse_timestamp("DCREATED", rest.trim())?;
        } else if let Some(rest) = line.strip_prefix(LAST_MODIFIED) {
            record.modified = parse_timestamp("LAST-MODIFIED", rest.trim())?;
        } else {
            trace!(line, "Ignoring line");
        }
    }

    Ok(record)
}

/// True for `NAME:` / `NAME;` lines, which always start a new property.
///
/// Names are upper-case letters, digits, and `-` (`END`, `X-IRMC-LUID`, ...).
fn is_property_line(line: &str) -> bool {
    line.find([':', ';']).is_some_and(|pos| {
        pos > 0
            && line[..pos]
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-')
    })
}

/// Decode file bytes to text.
///
/// Tries UTF-8 first, then falls back to Windows-1252 (which accepts every byte).
fn decode_file_bytes(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}
