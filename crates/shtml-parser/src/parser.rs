//! Tree builder for the strict HTML dialect.
//!
//! Pulls tokens from `shtml-lexer`'s [`Tokenizer`] and assembles a
//! [`Document`] by recursive descent: one `parse_subtree` frame per open
//! element. Comments are not kept where they appear; every comment, at any
//! depth, is appended to the document itself, in source order.
//!
//! The call stack is the parse stack. Where stack depth is a concern the
//! same walk can be driven by an explicit `Vec<(Element, String)>` of
//! open elements and their expected closing markers: push on an opening
//! tag, pop and attach to the new top on the matching closing tag. Short of
//! that, [`Parser::max_depth`] caps nesting.

use crate::dom::{Document, Element, Node};
use crate::options::Options;
use crate::tag::parse_tag;
use crate::{ErrorKind, ParseError};
use shtml_lexer::{Token, TokenKind, Tokenizer};
use tracing::{debug, trace};

/// Byte-order mark stripped from the start of the input.
const BOM: char = '\u{feff}';

/// Strict HTML document parser.
///
/// Holds all state for one parse; `parse` consumes it.
pub struct Parser {
    tokenizer: Tokenizer,
    options: Options,
    document: Document,
    max_depth: Option<usize>,
    depth: usize,
}

impl Parser {
    /// Create a parser for the given source with default options.
    pub fn new(source: &str) -> Self {
        let source = source.strip_prefix(BOM).unwrap_or(source);
        Self {
            tokenizer: Tokenizer::new(source),
            options: Options::default(),
            document: Document::new(String::new()),
            max_depth: None,
            depth: 0,
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Fail with [`ErrorKind::NestingTooDeep`] instead of recursing past
    /// `limit` open elements. Unlimited by default.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Parse the whole source into a document.
    pub fn parse(mut self) -> Result<Document, ParseError> {
        debug!(options = ?self.options, "parsing document");

        match self.tok()? {
            Some(token) if token.kind == TokenKind::Doctype => {
                self.document.doctype = token.content;
            }
            Some(token) => return Err(ParseError::new(ErrorKind::MissingDoctype, token.position)),
            None => return Err(self.error(ErrorKind::MissingDoctype)),
        }

        let root = self.parse_subtree(None)?;
        self.document.append_child(Node::Element(root));

        if let Some(extra) = self.tok()? {
            return Err(ParseError::new(ErrorKind::MultipleRoots, extra.position));
        }

        debug!(children = self.document.children.len(), "parsed document");
        Ok(self.document)
    }

    // =========================================================================
    // Token access
    // =========================================================================

    /// Next significant token.
    ///
    /// Comments are appended to the document and skipped, whitespace-only
    /// text is dropped. Every other component reads tokens through here.
    fn tok(&mut self) -> Result<Option<Token>, ParseError> {
        while let Some(token) = self.tokenizer.get()? {
            match token.kind {
                TokenKind::Comment => self.document.append_child(Node::Comment(token.content)),
                TokenKind::Text if token.is_blank_text() => {}
                _ => return Ok(Some(token)),
            }
        }
        Ok(None)
    }

    // =========================================================================
    // Elements
    // =========================================================================

    /// Parse one element and everything up to its closing tag.
    ///
    /// `parent` names the enclosing element for diagnostics.
    fn parse_subtree(&mut self, parent: Option<&str>) -> Result<Element, ParseError> {
        let Some(token) = self.tok()? else {
            let kind = match parent {
                None => ErrorKind::EmptyDocument,
                Some(_) => ErrorKind::NoTagInStream,
            };
            return Err(self.error(kind));
        };

        if token.kind != TokenKind::Tag {
            return Err(ParseError::new(ErrorKind::NoTagInStream, token.position));
        }
        if token.is_closing_tag() {
            return Err(ParseError::new(
                ErrorKind::UnexpectedClosingTag {
                    tag: token.content,
                    parent: parent.map(String::from),
                },
                token.position,
            ));
        }
        if let Some(limit) = self.max_depth {
            if self.depth >= limit {
                return Err(ParseError::new(ErrorKind::NestingTooDeep(limit), token.position));
            }
        }

        let mut element = parse_tag(&token.content, token.position, &self.options)?;
        trace!(tag = %element.tag, depth = self.depth, "open element");

        if element.is_void() {
            return Ok(element);
        }

        let closing = format!("</{}>", element.tag.to_lowercase());

        self.depth += 1;
        let children = self.parse_children(&mut element, &closing);
        self.depth -= 1;
        children?;

        match self.tok()? {
            Some(token) if Self::closes(&token, &closing) => Ok(element),
            Some(token) => Err(ParseError::new(
                ErrorKind::MissingClosingTag { expected: closing },
                token.position,
            )),
            None => Err(self.error(ErrorKind::MissingClosingTag { expected: closing })),
        }
    }

    /// Collect text and child elements until the closing tag, which is left
    /// in the tokenizer for the caller.
    fn parse_children(&mut self, element: &mut Element, closing: &str) -> Result<(), ParseError> {
        while let Some(token) = self.tok()? {
            match token.kind {
                TokenKind::Tag if Self::closes(&token, closing) => {
                    self.tokenizer.unget(token);
                    break;
                }
                TokenKind::Text => element.append_child(Node::Text(token.content)),
                TokenKind::Tag => {
                    self.tokenizer.unget(token);
                    let child = self.parse_subtree(Some(&element.tag))?;
                    element.append_child(Node::Element(child));
                }
                kind => return Err(ParseError::new(ErrorKind::UnexpectedToken(kind), token.position)),
            }
        }
        Ok(())
    }

    // --- Helpers ---

    /// Closing tags match ignoring case, and only when written exactly
    /// `</name>`.
    fn closes(token: &Token, closing: &str) -> bool {
        token.kind == TokenKind::Tag && token.content.to_lowercase() == closing
    }

    fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.tokenizer.pos())
    }
}
