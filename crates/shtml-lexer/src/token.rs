use std::fmt;

/// A position in source text, tracking line and column for error reporting.
///
/// `offset` counts characters (not bytes) from the start of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Position of the first character of a document.
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Advance past `ch`, moving to the next line on `\n`.
    pub(crate) fn advance(&mut self, ch: char) {
        self.offset += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Token classification for the strict HTML dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<!DOCTYPE html>`; content is the identifier (`html`).
    Doctype,
    /// `<!-- ... -->`; content is the raw payload between the delimiters.
    Comment,
    /// Any other `<...>`; content is the raw slice including both angle brackets.
    Tag,
    /// Character data with entity references already decoded.
    Text,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Doctype => "doctype",
            TokenKind::Comment => "comment",
            TokenKind::Tag => "tag",
            TokenKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub content: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, content: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            content: content.into(),
            position,
        }
    }

    /// True for text tokens made only of whitespace.
    pub fn is_blank_text(&self) -> bool {
        self.kind == TokenKind::Text && self.content.chars().all(char::is_whitespace)
    }

    /// True for tag tokens of the form `</...>`.
    pub fn is_closing_tag(&self) -> bool {
        self.kind == TokenKind::Tag && self.content.starts_with("</")
    }
}

/// Elements that never have children.
pub const VOID_ELEMENTS: &[&str] = &["base", "br", "hr", "img", "input", "link", "meta"];

/// Check if a tag name is a void element. The comparison ignores ASCII case.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}
