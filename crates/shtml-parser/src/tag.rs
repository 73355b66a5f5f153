//! Tag and attribute parser.
//!
//! Second-stage parse of one opening tag token, e.g. `<a href="/" hidden>`,
//! into an [`Element`] with no children. Runs its own [`Buffer`] over the
//! token text, started at the token's position so errors point into the
//! original document.

use crate::dom::{AttributeValue, Element};
use crate::options::Options;
use crate::{ErrorKind, ParseError, QuoteStyle};
use shtml_lexer::{Buffer, Position};

/// Parse the raw text of an opening tag.
pub fn parse_tag(raw: &str, origin: Position, options: &Options) -> Result<Element, ParseError> {
    TagParser {
        buffer: Buffer::with_origin(raw, origin),
        options,
    }
    .parse()
}

fn is_attribute_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

struct TagParser<'a> {
    buffer: Buffer,
    options: &'a Options,
}

impl TagParser<'_> {
    fn parse(mut self) -> Result<Element, ParseError> {
        if !self.buffer.skip_literal("<") {
            return Err(self.error(ErrorKind::ExpectedOpenAngle));
        }

        let mut element = Element::new(self.parse_tag_name()?);

        while self.buffer.peek().is_some_and(char::is_whitespace) {
            self.buffer.read_set(char::is_whitespace);
            let name = self.buffer.read_set(is_attribute_name_char);
            if name.is_empty() {
                break;
            }
            let value = self.parse_attribute_value()?;
            element.set_attribute(name, value);
        }

        if self.options.xml_perversion && self.buffer.peek() == Some('/') {
            self.buffer.get();
        }

        if !self.buffer.skip_literal(">") {
            let found = self.buffer.peek();
            return Err(self.error(ErrorKind::ExpectedCloseAngle { found }));
        }

        Ok(element)
    }

    /// An alphabetic character followed by any alphanumerics.
    fn parse_tag_name(&mut self) -> Result<String, ParseError> {
        match self.buffer.get() {
            Some(first) if first.is_alphabetic() => {
                let mut name = String::from(first);
                name.push_str(&self.buffer.read_set(char::is_alphanumeric));
                Ok(name)
            }
            Some(other) => {
                self.buffer.unget(other);
                Err(self.error(ErrorKind::ExpectedTagName))
            }
            None => Err(self.error(ErrorKind::ExpectedTagName)),
        }
    }

    /// Everything after the attribute name: nothing (a flag) or `=value`.
    fn parse_attribute_value(&mut self) -> Result<AttributeValue, ParseError> {
        if !self.buffer.skip_literal("=") {
            return Ok(AttributeValue::Flag);
        }

        match self.buffer.peek() {
            Some('"') => self.parse_quoted('"'),
            Some(ch) if ch.is_alphabetic() => {
                if !self.options.missing_quotes {
                    return Err(self.error(ErrorKind::DisallowedQuoteStyle(QuoteStyle::Missing)));
                }
                Ok(AttributeValue::String(
                    self.buffer.read_set(char::is_alphabetic),
                ))
            }
            Some('\'') => {
                if !self.options.single_quotes {
                    return Err(self.error(ErrorKind::DisallowedQuoteStyle(QuoteStyle::Single)));
                }
                self.parse_quoted('\'')
            }
            other => Err(self.error(ErrorKind::UnexpectedCharacter(other))),
        }
    }

    fn parse_quoted(&mut self, quote: char) -> Result<AttributeValue, ParseError> {
        let start = self.buffer.pos();
        self.buffer.get(); // consume opening quote

        let delim = quote.to_string();
        let value = self.buffer.skip_until(&delim);
        if !self.buffer.skip_literal(&delim) {
            return Err(ParseError::new(ErrorKind::UnterminatedAttributeValue, start));
        }
        Ok(AttributeValue::String(value))
    }

    fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.buffer.pos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(raw: &str) -> Element {
        parse_tag(raw, Position::start(), &Options::default()).unwrap()
    }

    fn parse_with(raw: &str, options: Options) -> Result<Element, ParseError> {
        parse_tag(raw, Position::start(), &options)
    }

    fn error(raw: &str) -> ErrorKind {
        parse_tag(raw, Position::start(), &Options::default())
            .unwrap_err()
            .kind
    }

    fn string(el: &Element, name: &str) -> Option<String> {
        el.attribute(name)
            .and_then(AttributeValue::as_str)
            .map(String::from)
    }

    // =========================================================================
    // Tag names
    // =========================================================================

    #[test]
    fn test_bare_tag() {
        let el = parse("<div>");
        assert_eq!(el.tag, "div");
        assert!(el.attributes.is_empty());
        assert!(el.children.is_empty());
    }

    #[test]
    fn test_tag_name_keeps_case_and_digits() {
        assert_eq!(parse("<H1>").tag, "H1");
    }

    #[test]
    fn test_tag_name_must_start_alphabetic() {
        assert_eq!(error("<1a>"), ErrorKind::ExpectedTagName);
        assert_eq!(error("< a>"), ErrorKind::ExpectedTagName);
        assert_eq!(error("<>"), ErrorKind::ExpectedTagName);
    }

    #[test]
    fn test_open_angle_required() {
        assert_eq!(error("div>"), ErrorKind::ExpectedOpenAngle);
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    #[test]
    fn test_double_quoted() {
        let el = parse("<a href=\"/about\" title=\"\">");
        assert_eq!(string(&el, "href").as_deref(), Some("/about"));
        assert_eq!(string(&el, "title").as_deref(), Some(""));
    }

    #[test]
    fn test_values_not_entity_decoded() {
        let el = parse("<a href=\"?a=1&amp;b=2\">");
        assert_eq!(string(&el, "href").as_deref(), Some("?a=1&amp;b=2"));
    }

    #[test]
    fn test_flag_attributes() {
        let el = parse("<input disabled data-x_y>");
        assert_eq!(el.attribute("disabled"), Some(&AttributeValue::Flag));
        assert_eq!(el.attribute("data-x_y"), Some(&AttributeValue::Flag));
    }

    #[test]
    fn test_duplicate_attribute_last_wins() {
        let el = parse("<p id=\"a\" id=\"b\">");
        assert_eq!(el.attributes.len(), 1);
        assert_eq!(string(&el, "id").as_deref(), Some("b"));
    }

    #[test]
    fn test_trailing_whitespace() {
        let el = parse("<p class=\"x\"  \n>");
        assert_eq!(string(&el, "class").as_deref(), Some("x"));
    }

    #[test]
    fn test_single_quoted_default() {
        let el = parse("<div id='x'>");
        assert_eq!(string(&el, "id").as_deref(), Some("x"));
    }

    #[test]
    fn test_single_quotes_disabled() {
        let options = Options {
            single_quotes: false,
            ..Options::default()
        };
        let err = parse_with("<div id='x'>", options).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DisallowedQuoteStyle(QuoteStyle::Single));
    }

    #[test]
    fn test_missing_quotes_disabled_by_default() {
        assert_eq!(
            error("<td align=left>"),
            ErrorKind::DisallowedQuoteStyle(QuoteStyle::Missing)
        );
    }

    #[test]
    fn test_missing_quotes_enabled() {
        let options = Options {
            missing_quotes: true,
            ..Options::default()
        };
        let el = parse_with("<td align=left valign=top>", options).unwrap();
        assert_eq!(string(&el, "align").as_deref(), Some("left"));
        assert_eq!(string(&el, "valign").as_deref(), Some("top"));
    }

    #[test]
    fn test_unquoted_value_is_alphabetic_only() {
        let options = Options {
            missing_quotes: true,
            ..Options::default()
        };
        let err = parse_with("<td width=a1>", options).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpectedCloseAngle { found: Some('1') });
    }

    #[test]
    fn test_unexpected_value_character() {
        assert_eq!(error("<td width=10>"), ErrorKind::UnexpectedCharacter(Some('1')));
        assert_eq!(error("<td width=>"), ErrorKind::UnexpectedCharacter(Some('>')));
    }

    #[test]
    fn test_unterminated_value() {
        let err = parse_tag("<a href=\"/x>", Position::start(), &Options::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedAttributeValue);
        assert_eq!(err.position.column, 9);
    }

    // =========================================================================
    // Tag end
    // =========================================================================

    #[test]
    fn test_self_closing_slash_tolerated() {
        let el = parse("<br/>");
        assert_eq!(el.tag, "br");
        let el = parse("<img src=\"a.png\" />");
        assert_eq!(string(&el, "src").as_deref(), Some("a.png"));
    }

    #[test]
    fn test_self_closing_slash_rejected_without_xml_perversion() {
        let options = Options {
            xml_perversion: false,
            ..Options::default()
        };
        let err = parse_with("<br/>", options).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpectedCloseAngle { found: Some('/') });
    }

    #[test]
    fn test_close_angle_required() {
        assert_eq!(
            error("<a href=\"x\"title=\"y\">"),
            ErrorKind::ExpectedCloseAngle { found: Some('t') }
        );
    }

    #[test]
    fn test_error_position_is_absolute() {
        let origin = Position::new(40, 3, 7);
        let err = parse_tag("<p !>", origin, &Options::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpectedCloseAngle { found: Some('!') });
        assert_eq!(err.position, Position::new(43, 3, 10));
    }
}
