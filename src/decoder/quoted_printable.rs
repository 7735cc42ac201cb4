//! Strict quoted-printable decoder (RFC 2045 §6.7).

use crate::error::{Result, VntError};

/// Decode quoted-printable text into raw bytes.
///
/// - `=XX` (hex digits, either case) becomes one byte.
/// - `=` followed by `\n` or `\r\n` is a soft line break and is dropped.
/// - A lone `=` at the very end of the input is a soft break as well.
///
/// Any other `=` sequence is rejected with [`VntError::InvalidEncodedData`].
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'=' {
            result.push(bytes[i]);
            i += 1;
            continue;
        }

        match &bytes[i + 1..] {
            [] => i += 1,
            [b'\n', ..] => i += 2,
            [b'\r', b'\n', ..] => i += 3,
            [hi, lo, ..] => match (hex_value(*hi), hex_value(*lo)) {
                (Some(hi), Some(lo)) => {
                    result.push((hi << 4) | lo);
                    i += 3;
                }
                _ => return Err(invalid_escape(bytes, i)),
            },
            [_] => return Err(invalid_escape(bytes, i)),
        }
    }

    Ok(result)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

fn invalid_escape(bytes: &[u8], pos: usize) -> VntError {
    let end = (pos + 3).min(bytes.len());
    VntError::InvalidEncodedData(format!(
        "invalid escape '{}' at offset {pos}",
        String::from_utf8_lossy(&bytes[pos..end])
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_escapes() {
        assert_eq!(decode("Hello=2C=20World!").unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_decode_lowercase_hex() {
        assert_eq!(decode("caf=c3=a9").unwrap(), "café".as_bytes());
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(decode("no escapes here").unwrap(), b"no escapes here");
    }

    #[test]
    fn test_soft_line_breaks() {
        assert_eq!(decode("first=\nsecond=\r\nthird=").unwrap(), b"firstsecondthird");
    }

    #[test]
    fn test_encoded_line_break() {
        assert_eq!(decode("line one=0D=0Aline two").unwrap(), b"line one\r\nline two");
    }

    #[test]
    fn test_invalid_hex_rejected() {
        let err = decode("bad=ZZ").unwrap_err();
        assert!(matches!(err, VntError::InvalidEncodedData(_)));
    }

    #[test]
    fn test_truncated_escape_rejected() {
        let err = decode("bad=4").unwrap_err();
        assert!(matches!(err, VntError::InvalidEncodedData(_)));
    }
}
