//! Note parsing: line scanning, the `BODY` property grammar, and timestamps.

pub mod body;
pub mod record;
pub mod timestamp;

pub use record::{parse_file, parse_lines, parse_lines_with_fallback, parse_str};
