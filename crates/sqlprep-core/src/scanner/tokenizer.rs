//! Template scanner implementation.

use super::{PlaceholderKind, Segment, Span, Token};

/// A scanner that splits a template into literal text and placeholders.
pub struct Scanner<'a> {
    /// The template being scanned.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position where the pending text run starts.
    start: usize,
    /// Segments produced so far.
    segments: Vec<Segment>,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for the given template.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            segments: Vec::new(),
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// Emits the pending text run up to `end`.
    fn flush_text(&mut self, end: usize) {
        if end > self.start {
            self.segments.push(Segment::Text(Span::new(self.start, end)));
        }
    }

    /// Scans the whole template.
    ///
    /// A `?` followed by anything other than a placeholder kind letter,
    /// including another `?`, is copied as-is.
    #[must_use]
    pub fn scan(mut self) -> Vec<Segment> {
        while let Some(c) = self.peek() {
            if c != '?' {
                self.advance();
                continue;
            }
            match self.peek_next().and_then(PlaceholderKind::from_char) {
                Some(kind) => {
                    self.flush_text(self.pos);
                    let span = Span::new(self.pos, self.pos + 2);
                    self.segments.push(Segment::Placeholder(Token::new(kind, span)));
                    self.advance();
                    self.advance();
                    self.start = self.pos;
                }
                None => self.advance(),
            }
        }
        self.flush_text(self.pos);
        self.segments
    }
}
