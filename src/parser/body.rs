//! `BODY` property grammar.
//!
//! ```text
//! BODY;<label>=<charset>;<label>=<encoding>:<value>
//! ```
//!
//! The property name is followed by exactly two `;`-separated parameters.
//! The first `:` after the second parameter ends the parameter list, and
//! everything after it is the raw value, so `;` and `:` inside the payload
//! are kept as-is. Parameter labels (`CHARSET`, `ENCODING`) are not checked;
//! parameters are taken by position.

use crate::error::{Result, VntError};

/// Property name that starts a body line.
pub const BODY_NAME: &str = "BODY";

/// Parameters and value extracted from one `BODY` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyField<'a> {
    pub charset: &'a str,
    pub transfer_encoding: &'a str,
    pub raw_body: &'a str,
}

/// Parse a `BODY;...:...` line (trailing whitespace is ignored).
pub fn parse_body_field(line: &str) -> Result<BodyField<'_>> {
    let line = line.trim_end();

    let name = next_token(line).ok_or_else(|| malformed("missing ';' after the property name"))?;
    let mut rest = name.rest;
    if name.text != BODY_NAME || name.delimiter != ';' {
        return Err(malformed(format!(
            "expected '{BODY_NAME};', found '{}'",
            name.text
        )));
    }

    let mut params = Vec::with_capacity(2);
    loop {
        let token = next_token(rest).ok_or_else(|| malformed("missing ':' before the value"))?;
        params.push(parameter_value(token.text)?);
        rest = token.rest;
        if token.delimiter == ':' {
            break;
        }
        if params.len() == 2 {
            return Err(malformed("more than two parameters"));
        }
    }

    match params[..] {
        [charset, transfer_encoding] => Ok(BodyField {
            charset,
            transfer_encoding,
            raw_body: rest,
        }),
        _ => Err(malformed(format!(
            "expected charset and encoding parameters, found {}",
            params.len()
        ))),
    }
}

/// Text up to the next `;` or `:`, plus what follows the delimiter.
struct Token<'a> {
    text: &'a str,
    delimiter: char,
    rest: &'a str,
}

fn next_token(input: &str) -> Option<Token<'_>> {
    let pos = input.find([';', ':'])?;
    let delimiter = if input.as_bytes()[pos] == b';' { ';' } else { ':' };
    Some(Token {
        text: &input[..pos],
        delimiter,
        rest: &input[pos + 1..],
    })
}

/// Value of a `label=value` parameter.
fn parameter_value(param: &str) -> Result<&str> {
    param
        .split_once('=')
        .map(|(_, value)| value)
        .ok_or_else(|| malformed(format!("parameter '{param}' has no '='")))
}

fn malformed(reason: impl Into<String>) -> VntError {
    VntError::MalformedBodyField(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_body() {
        let field =
            parse_body_field("BODY;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:Hello=2C=20World!\r\n")
                .unwrap();
        assert_eq!(field.charset, "UTF-8");
        assert_eq!(field.transfer_encoding, "QUOTED-PRINTABLE");
        assert_eq!(field.raw_body, "Hello=2C=20World!");
    }

    #[test]
    fn test_payload_keeps_separators() {
        let field = parse_body_field("BODY;CHARSET=UTF-8;ENCODING=8BIT:at 10:30; bring tea").unwrap();
        assert_eq!(field.transfer_encoding, "8BIT");
        assert_eq!(field.raw_body, "at 10:30; bring tea");
    }

    #[test]
    fn test_labels_are_positional() {
        let field = parse_body_field("BODY;CS=ISO-8859-1;ENC=QUOTED-PRINTABLE:x").unwrap();
        assert_eq!(field.charset, "ISO-8859-1");
        assert_eq!(field.transfer_encoding, "QUOTED-PRINTABLE");
    }

    #[test]
    fn test_empty_value() {
        let field = parse_body_field("BODY;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:").unwrap();
        assert_eq!(field.raw_body, "");
    }

    #[test]
    fn test_missing_colon() {
        let err = parse_body_field("BODY;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE").unwrap_err();
        assert!(matches!(err, VntError::MalformedBodyField(_)));
    }

    #[test]
    fn test_single_parameter() {
        let err = parse_body_field("BODY;CHARSET=UTF-8:text").unwrap_err();
        assert!(matches!(err, VntError::MalformedBodyField(_)));
    }

    #[test]
    fn test_too_many_parameters() {
        let err = parse_body_field("BODY;CHARSET=UTF-8;ENCODING=8BIT;LANGUAGE=en:text").unwrap_err();
        assert!(matches!(err, VntError::MalformedBodyField(_)));
    }

    #[test]
    fn test_parameter_without_equals() {
        let err = parse_body_field("BODY;UTF-8;ENCODING=8BIT:text").unwrap_err();
        assert!(matches!(err, VntError::MalformedBodyField(_)));
    }

    #[test]
    fn test_wrong_property_name() {
        let err = parse_body_field("BODYX;CHARSET=UTF-8;ENCODING=8BIT:text").unwrap_err();
        assert!(matches!(err, VntError::MalformedBodyField(_)));
    }
}
