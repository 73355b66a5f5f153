//! Strict HTML Lexer
//!
//! Turns a strict-dialect HTML document into a stream of tokens.
//! A document must open with `<!DOCTYPE html>`; after that the tokenizer
//! recognises comments, tags and text, decoding entity references inside
//! text as it goes.
//!
//! # Example
//!
//! ```
//! use shtml_lexer::{TokenKind, Tokenizer};
//!
//! let tokens = Tokenizer::tokenize("<!DOCTYPE html><p>hi</p>").unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Doctype);
//! assert_eq!(tokens.len(), 4);
//! ```

pub mod buffer;
pub mod entities;
pub mod token;
pub mod tokenizer;

pub use buffer::Buffer;
pub use entities::decode_entity;
pub use token::{is_void_element, Position, Token, TokenKind, VOID_ELEMENTS};
pub use tokenizer::Tokenizer;

/// What went wrong while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("malformed doctype: {0}")]
    MalformedDoctype(String),
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unterminated tag")]
    UnterminatedTag,
}

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Lexer error at {position}: {kind}")]
pub struct LexerError {
    pub kind: LexErrorKind,
    pub position: Position,
}

impl LexerError {
    pub fn new(kind: LexErrorKind, position: Position) -> Self {
        Self { kind, position }
    }
}
