//! Character cursor over an in-memory document.
//!
//! The buffer is the only component that touches raw characters. It offers
//! one character of pushback, run reading, literal matching and position
//! tracking; everything above it works in terms of these operations.

use crate::token::Position;

/// Cursor over the characters of one input string.
///
/// Uses a `Vec<char>` for index-based navigation, with a single pushback
/// slot in front of it.
#[derive(Debug, Clone)]
pub struct Buffer {
    chars: Vec<char>,
    index: usize,
    position: Position,
    previous: Position,
    pending: Option<char>,
}

impl Buffer {
    /// Create a buffer whose first character is at `Position::start()`.
    pub fn new(source: &str) -> Self {
        Self::with_origin(source, Position::start())
    }

    /// Create a buffer whose first character is reported at `origin`.
    ///
    /// Used for sub-buffers over a slice of a larger document so that
    /// diagnostics still point into the original source.
    pub fn with_origin(source: &str, origin: Position) -> Self {
        Self {
            chars: source.chars().collect(),
            index: 0,
            position: origin,
            previous: origin,
            pending: None,
        }
    }

    /// Consume and return the next character, or `None` at end of input.
    pub fn get(&mut self) -> Option<char> {
        let ch = match self.pending.take() {
            Some(ch) => ch,
            None => {
                let ch = *self.chars.get(self.index)?;
                self.index += 1;
                ch
            }
        };
        self.previous = self.position;
        self.position.advance(ch);
        Some(ch)
    }

    /// Return the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.pending.or_else(|| self.chars.get(self.index).copied())
    }

    /// Push back the character most recently returned by [`Buffer::get`].
    ///
    /// The pushback slot holds one character; calling this twice without an
    /// intervening `get` is a logic error in the caller.
    pub fn unget(&mut self, ch: char) {
        debug_assert!(
            self.pending.is_none(),
            "unget called with a character already pushed back"
        );
        self.pending = Some(ch);
        self.position = self.previous;
    }

    /// Consume the longest run of characters accepted by `allowed`.
    ///
    /// The run may be empty.
    pub fn read_set(&mut self, allowed: impl Fn(char) -> bool) -> String {
        let mut run = String::new();
        while let Some(ch) = self.peek() {
            if !allowed(ch) {
                break;
            }
            run.push(ch);
            self.get();
        }
        run
    }

    /// Consume everything up to, but not including, the next `delim`.
    ///
    /// When `delim` never occurs the buffer is left at end of input; callers
    /// check [`Buffer::literal_follows`] to tell the two outcomes apart.
    pub fn skip_until(&mut self, delim: &str) -> String {
        let mut skipped = String::new();
        while self.more() && !self.literal_follows(delim) {
            if let Some(ch) = self.get() {
                skipped.push(ch);
            }
        }
        skipped
    }

    /// Consume `text` if it is exactly what comes next.
    pub fn skip_literal(&mut self, text: &str) -> bool {
        if !self.literal_follows(text) {
            return false;
        }
        for _ in text.chars() {
            self.get();
        }
        true
    }

    /// Check whether `text` comes next, without consuming anything.
    pub fn literal_follows(&self, text: &str) -> bool {
        let mut upcoming = self.upcoming();
        text.chars().all(|expected| upcoming.next() == Some(expected))
    }

    /// Position of the next character to be read.
    pub fn pos(&self) -> Position {
        self.position
    }

    /// Whether any input remains.
    pub fn more(&self) -> bool {
        self.peek().is_some()
    }

    fn upcoming(&self) -> impl Iterator<Item = char> + '_ {
        self.pending
            .into_iter()
            .chain(self.chars[self.index..].iter().copied())
    }
}
