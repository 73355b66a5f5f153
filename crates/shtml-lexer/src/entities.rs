//! Character entity references.
//!
//! Handles decoding of:
//! - Named references: `&amp;` `&lt;` `&nbsp;` and other common names
//! - Numeric character references: `&#65;` `&#x41;`

/// Decode one entity reference.
///
/// `reference` is the raw text starting at `&`, with or without the
/// trailing `;`. Returns `None` for unknown names and for numeric values
/// that are not Unicode scalar values.
pub fn decode_entity(reference: &str) -> Option<String> {
    let body = reference.strip_prefix('&')?;
    let body = body.strip_suffix(';').unwrap_or(body);

    if let Some(number) = body.strip_prefix('#') {
        return decode_numeric(number).map(String::from);
    }

    named(body).map(String::from)
}

fn decode_numeric(number: &str) -> Option<char> {
    let code = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

fn named(name: &str) -> Option<&'static str> {
    let text = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "shy" => "\u{ad}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "middot" => "\u{b7}",
        "sect" => "\u{a7}",
        "para" => "\u{b6}",
        "cent" => "\u{a2}",
        "pound" => "\u{a3}",
        "yen" => "\u{a5}",
        "euro" => "\u{20ac}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "bull" => "\u{2022}",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_entities() {
        assert_eq!(decode_entity("&amp;").as_deref(), Some("&"));
        assert_eq!(decode_entity("&lt;").as_deref(), Some("<"));
        assert_eq!(decode_entity("&nbsp;").as_deref(), Some("\u{a0}"));
        assert_eq!(decode_entity("&mdash;").as_deref(), Some("\u{2014}"));
    }

    #[test]
    fn test_decimal_reference() {
        assert_eq!(decode_entity("&#65;").as_deref(), Some("A"));
        assert_eq!(decode_entity("&#8364;").as_deref(), Some("\u{20ac}"));
    }

    #[test]
    fn test_hex_reference() {
        assert_eq!(decode_entity("&#x41;").as_deref(), Some("A"));
        assert_eq!(decode_entity("&#X20AC;").as_deref(), Some("\u{20ac}"));
    }

    #[test]
    fn test_missing_semicolon() {
        assert_eq!(decode_entity("&amp").as_deref(), Some("&"));
    }

    #[test]
    fn test_unknown_and_invalid() {
        assert_eq!(decode_entity("&bogus;"), None);
        assert_eq!(decode_entity("&#xD800;"), None);
        assert_eq!(decode_entity("&#;"), None);
        assert_eq!(decode_entity("&#12a;"), None);
        assert_eq!(decode_entity("amp;"), None);
    }
}
