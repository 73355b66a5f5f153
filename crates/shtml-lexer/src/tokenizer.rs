use crate::buffer::Buffer;
use crate::entities::decode_entity;
use crate::token::{Position, Token, TokenKind};
use crate::{LexErrorKind, LexerError};
use tracing::trace;

/// Pull-based tokenizer for the strict HTML dialect.
///
/// Wraps one [`Buffer`] and produces doctype, comment, tag and text tokens
/// on demand. Holds a single token of pushback so the tree builder can
/// look at a token and hand it back.
pub struct Tokenizer {
    buffer: Buffer,
    pending: Option<Token>,
    failed: bool,
}

impl Tokenizer {
    /// Create a tokenizer over the given source.
    pub fn new(source: &str) -> Self {
        Self {
            buffer: Buffer::new(source),
            pending: None,
            failed: false,
        }
    }

    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
        Tokenizer::new(source).collect()
    }

    /// Consume and return the next token, or `None` at end of input.
    pub fn get(&mut self) -> Result<Option<Token>, LexerError> {
        match self.pending.take() {
            Some(token) => Ok(Some(token)),
            None => self.scan_token(),
        }
    }

    /// Return the next token without consuming it.
    pub fn peek(&mut self) -> Result<Option<&Token>, LexerError> {
        if self.pending.is_none() {
            self.pending = self.scan_token()?;
        }
        Ok(self.pending.as_ref())
    }

    /// Push back a token so the next [`Tokenizer::get`] returns it again.
    ///
    /// Only one token fits in the pushback slot.
    pub fn unget(&mut self, token: Token) {
        debug_assert!(
            self.pending.is_none(),
            "unget called with a token already pushed back"
        );
        self.pending = Some(token);
    }

    /// Position of the next unread token, for diagnostics.
    pub fn pos(&self) -> Position {
        match &self.pending {
            Some(token) => token.position,
            None => self.buffer.pos(),
        }
    }

    // --- Scanners ---

    /// Choose a production from the upcoming characters and scan one token.
    fn scan_token(&mut self) -> Result<Option<Token>, LexerError> {
        if !self.buffer.more() {
            return Ok(None);
        }

        let start = self.buffer.pos();
        let token = if self.buffer.skip_literal("<!DOCTYPE") {
            self.scan_doctype(start)?
        } else if self.buffer.skip_literal("<!--") {
            self.scan_comment(start)?
        } else if self.buffer.peek() == Some('<') {
            self.scan_tag(start)?
        } else {
            self.scan_text(start)
        };

        trace!(
            kind = %token.kind,
            line = token.position.line,
            column = token.position.column,
            "token"
        );
        Ok(Some(token))
    }

    /// Scan the remainder of `<!DOCTYPE html>` after the opening literal.
    fn scan_doctype(&mut self, start: Position) -> Result<Token, LexerError> {
        if self.buffer.read_set(char::is_whitespace).is_empty() {
            return Err(self.malformed_doctype("whitespace expected after <!DOCTYPE"));
        }
        if !self.buffer.skip_literal("html") {
            return Err(self.malformed_doctype("'html' expected"));
        }
        self.buffer.read_set(char::is_whitespace);
        if !self.buffer.skip_literal(">") {
            return Err(self.malformed_doctype("'>' expected"));
        }
        Ok(Token::new(TokenKind::Doctype, "html", start))
    }

    /// Scan a comment body after `<!--`. The payload is kept raw.
    fn scan_comment(&mut self, start: Position) -> Result<Token, LexerError> {
        let content = self.buffer.skip_until("-->");
        if !self.buffer.skip_literal("-->") {
            return Err(LexerError::new(LexErrorKind::UnterminatedComment, start));
        }
        Ok(Token::new(TokenKind::Comment, content, start))
    }

    /// Scan a tag verbatim from `<` through the first `>`.
    fn scan_tag(&mut self, start: Position) -> Result<Token, LexerError> {
        let mut raw = self.buffer.skip_until(">");
        if !self.buffer.skip_literal(">") {
            return Err(LexerError::new(LexErrorKind::UnterminatedTag, start));
        }
        raw.push('>');
        Ok(Token::new(TokenKind::Tag, raw, start))
    }

    /// Scan character data up to the next `<`, decoding entity references.
    fn scan_text(&mut self, start: Position) -> Token {
        let mut text = String::new();

        while let Some(ch) = self.buffer.get() {
            match ch {
                '<' => {
                    self.buffer.unget(ch);
                    break;
                }
                '&' => {
                    let mut reference = String::from('&');
                    reference.push_str(&self.buffer.skip_until(";"));
                    if self.buffer.skip_literal(";") {
                        reference.push(';');
                    }
                    // Unknown references stay as written.
                    match decode_entity(&reference) {
                        Some(decoded) => text.push_str(&decoded),
                        None => text.push_str(&reference),
                    }
                }
                _ => text.push(ch),
            }
        }

        Token::new(TokenKind::Text, text, start)
    }

    // --- Helpers ---

    fn malformed_doctype(&self, detail: &str) -> LexerError {
        LexerError::new(
            LexErrorKind::MalformedDoctype(detail.to_string()),
            self.buffer.pos(),
        )
    }
}

impl Iterator for Tokenizer {
    type Item = Result<Token, LexerError>;

    /// Yields tokens until end of input; stops for good after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.get().transpose();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}
