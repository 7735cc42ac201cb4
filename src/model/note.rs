//! The parsed representation of one `.vnt` note.

use chrono::{Local, NaiveDateTime, Timelike};

/// One note record, built fresh for every input file.
///
/// Fields are populated while the parser scans the file top to bottom; a
/// later line for the same field overwrites an earlier one. Both timestamps
/// start at the capture time passed to [`Record::new`] and keep it when the
/// file has no `DCREATED` / `LAST-MODIFIED` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Producing application tag from `BEGIN:` (usually `VNOTE`).
    pub program: String,
    /// Format version from `VERSION:`.
    pub format_version: String,
    /// Charset name declared on the `BODY` line.
    pub charset: String,
    /// Transfer-encoding declared on the `BODY` line.
    pub transfer_encoding: String,
    /// Body text exactly as stored, still encoded.
    pub raw_body: String,
    /// Decoded text; `None` until [`crate::decoder::decode_record`] runs.
    pub decoded_body: Option<String>,
    /// `DCREATED:` timestamp.
    pub created: NaiveDateTime,
    /// `LAST-MODIFIED:` timestamp; names the output file.
    pub modified: NaiveDateTime,
}

impl Record {
    /// Create an empty record whose timestamps default to `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            program: String::new(),
            format_version: String::new(),
            charset: String::new(),
            transfer_encoding: String::new(),
            raw_body: String::new(),
            decoded_body: None,
            created: now,
            modified: now,
        }
    }

    /// Decoded text, if decoding has run.
    pub fn text(&self) -> Option<&str> {
        self.decoded_body.as_deref()
    }
}

/// Local wall-clock time truncated to whole seconds.
pub fn captured_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
