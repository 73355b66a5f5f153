//! Strict HTML Parser
//!
//! Builds a [`Document`] tree from a token stream produced by `shtml-lexer`.
//! The dialect is deliberately narrow: a document must start with
//! `<!DOCTYPE html>`, contain exactly one root element, and close every
//! non-void element explicitly. Anything else is rejected, never repaired.
//!
//! # Example
//!
//! ```
//! let doc = shtml_parser::parse("<!DOCTYPE html><p class=\"x\">a &amp; b</p>").unwrap();
//! let root = doc.root().unwrap();
//! assert_eq!(root.tag, "p");
//! assert_eq!(root.text(), "a & b");
//! ```

pub mod dom;
pub mod options;
pub mod parser;
pub mod tag;

pub use dom::{AttributeValue, Document, Element, Node};
pub use options::{OptionOverride, Options, OptionsError};
pub use parser::Parser;

use shtml_lexer::{LexErrorKind, LexerError, Position, TokenKind};
use std::fmt;

/// Parse a document with the default [`Options`].
pub fn parse(source: &str) -> Result<Document, ParseError> {
    Parser::new(source).parse()
}

/// Parse a document with the given [`Options`].
pub fn parse_with(source: &str, options: Options) -> Result<Document, ParseError> {
    Parser::new(source).with_options(options).parse()
}

/// Which attribute quoting style was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `name='value'` while `single_quotes` is off.
    Single,
    /// `name=value` while `missing_quotes` is off.
    Missing,
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteStyle::Single => f.write_str("single-quoted attribute values are not allowed"),
            QuoteStyle::Missing => f.write_str("unquoted attribute values are not allowed"),
        }
    }
}

/// What went wrong while building the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("{0}")]
    Lexer(LexErrorKind),
    #[error("Missing doctype")]
    MissingDoctype,
    #[error("Empty document")]
    EmptyDocument,
    #[error("Only one root element allowed")]
    MultipleRoots,
    #[error("no tag in stream")]
    NoTagInStream,
    #[error("unexpected closing tag {tag}{}", inside(.parent))]
    UnexpectedClosingTag { tag: String, parent: Option<String> },
    #[error("{expected} expected")]
    MissingClosingTag { expected: String },
    #[error("unexpected {0} token")]
    UnexpectedToken(TokenKind),
    #[error("'<' expected")]
    ExpectedOpenAngle,
    #[error("tag name expected")]
    ExpectedTagName,
    #[error("'>' expected, got {}", describe(.found))]
    ExpectedCloseAngle { found: Option<char> },
    #[error("unterminated attribute value")]
    UnterminatedAttributeValue,
    #[error("{0}")]
    DisallowedQuoteStyle(QuoteStyle),
    #[error("unexpected character {}", describe(.0))]
    UnexpectedCharacter(Option<char>),
    #[error("elements nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

fn describe(ch: &Option<char>) -> String {
    match ch {
        Some(ch) => format!("{ch:?}"),
        None => "end of input".to_string(),
    }
}

fn inside(parent: &Option<String>) -> String {
    parent
        .as_ref()
        .map(|p| format!(" inside <{p}>"))
        .unwrap_or_default()
}

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Parse error at {position}: {kind}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub position: Position,
}

impl ParseError {
    pub fn new(kind: ErrorKind, position: Position) -> Self {
        Self { kind, position }
    }
}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        Self::new(ErrorKind::Lexer(e.kind), e.position)
    }
}
