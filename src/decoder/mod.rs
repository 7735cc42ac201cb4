//! Body decoding: transfer-encoding removal and charset conversion.

pub mod quoted_printable;

use encoding_rs::Encoding;
use tracing::debug;

use crate::error::{Result, VntError};
use crate::model::note::Record;

/// Transfer-encoding marker that triggers quoted-printable decoding.
///
/// Matched case-sensitively; any other value leaves the body untouched.
pub const QUOTED_PRINTABLE: &str = "QUOTED-PRINTABLE";

/// Decode a raw body according to its declared transfer-encoding and charset.
///
/// For [`QUOTED_PRINTABLE`] bodies the escapes are decoded to bytes, which are
/// then converted from `charset` to UTF-8. For every other encoding the raw
/// body is returned unchanged and the charset is not consulted.
pub fn decode(raw_body: &str, transfer_encoding: &str, charset: &str) -> Result<String> {
    if transfer_encoding != QUOTED_PRINTABLE {
        debug!(
            encoding = transfer_encoding,
            "No transfer decoding, using body as-is"
        );
        return Ok(raw_body.to_string());
    }

    let bytes = quoted_printable::decode(raw_body)?;
    decode_charset(charset, &bytes)
}

/// Decode the record's body and store the result in `decoded_body`.
pub fn decode_record(record: &mut Record) -> Result<()> {
    let text = decode(
        &record.raw_body,
        &record.transfer_encoding,
        &record.charset,
    )?;
    record.decoded_body = Some(text);
    Ok(())
}

/// Convert bytes in the named charset to a `String`.
///
/// Unknown labels fail with [`VntError::UnsupportedCharset`]; byte sequences
/// that are malformed in the charset fail with [`VntError::InvalidEncodedData`].
fn decode_charset(charset: &str, bytes: &[u8]) -> Result<String> {
    // Labels mapped to `replacement` (ISO-2022-KR, HZ-GB-2312, ...) count as unknown.
    let encoding = Encoding::for_label_no_replacement(charset.trim().as_bytes())
        .ok_or_else(|| VntError::UnsupportedCharset(charset.to_string()))?;

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            VntError::InvalidEncodedData(format!("body is not valid {}", encoding.name()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_quoted_printable_utf8() {
        let text = decode("Hello=2C=20World!", QUOTED_PRINTABLE, "UTF-8").unwrap();
        assert_eq!(text, "Hello, World!");
    }

    #[test]
    fn test_decode_iso8859_1() {
        let text = decode("R=E9sum=E9", QUOTED_PRINTABLE, "ISO-8859-1").unwrap();
        assert_eq!(text, "Résumé");
    }

    #[test]
    fn test_decode_windows1252() {
        let text = decode("M=FCller", QUOTED_PRINTABLE, "windows-1252").unwrap();
        assert_eq!(text, "Müller");
    }

    #[test]
    fn test_decode_shift_jis() {
        // 日本
        let text = decode("=93=FA=96=7B", QUOTED_PRINTABLE, "Shift_JIS").unwrap();
        assert_eq!(text, "日本");
    }

    #[test]
    fn test_other_encoding_passes_through() {
        let raw = "Hello=2C=20World! =ZZ";
        assert_eq!(decode(raw, "8BIT", "UTF-8").unwrap(), raw);
        assert_eq!(decode(raw, "", "").unwrap(), raw);
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        let raw = "Hello=2C=20World!";
        assert_eq!(decode(raw, "quoted-printable", "UTF-8").unwrap(), raw);
    }

    #[test]
    fn test_passthrough_ignores_bogus_charset() {
        assert_eq!(decode("plain", "8BIT", "BOGUS-1").unwrap(), "plain");
    }

    #[test]
    fn test_unsupported_charset() {
        let err = decode("Hello", QUOTED_PRINTABLE, "BOGUS-1").unwrap_err();
        assert!(matches!(err, VntError::UnsupportedCharset(ref c) if c == "BOGUS-1"));
    }

    #[test]
    fn test_replacement_labels_unsupported() {
        for label in ["ISO-2022-KR", "hz-gb-2312"] {
            let err = decode("Hello", QUOTED_PRINTABLE, label).unwrap_err();
            assert!(matches!(err, VntError::UnsupportedCharset(ref c) if c == label));
        }
    }

    #[test]
    fn test_invalid_qp_reported_before_charset() {
        let err = decode("bad=G1", QUOTED_PRINTABLE, "BOGUS-1").unwrap_err();
        assert!(matches!(err, VntError::InvalidEncodedData(_)));
    }

    #[test]
    fn test_invalid_utf8_bytes() {
        let err = decode("=C3=28", QUOTED_PRINTABLE, "UTF-8").unwrap_err();
        assert!(matches!(err, VntError::InvalidEncodedData(_)));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let a = decode("caf=C3=A9", QUOTED_PRINTABLE, "UTF-8").unwrap();
        let b = decode("caf=C3=A9", QUOTED_PRINTABLE, "UTF-8").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_record_sets_body() {
        let mut record = Record::new(crate::model::note::captured_now());
        record.charset = "UTF-8".into();
        record.transfer_encoding = QUOTED_PRINTABLE.into();
        record.raw_body = "caf=C3=A9".into();
        decode_record(&mut record).unwrap();
        assert_eq!(record.text(), Some("café"));
    }
}
