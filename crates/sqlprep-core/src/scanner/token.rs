//! Placeholder kinds and tokens.

use std::fmt;

use super::Span;

/// The closed set of placeholder kinds.
///
/// Each kind is written in a template as `?` followed by its letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// `?s` quoted string.
    String,
    /// `?i` integer.
    Integer,
    /// `?f` float.
    Float,
    /// `?a` parenthesized IN-list.
    List,
    /// `?A` `column = value` SET-list.
    Assoc,
    /// `?M` multi-row VALUES list.
    MultiRow,
    /// `?t` prefixed table identifier.
    Table,
    /// `?c` column identifier.
    Column,
    /// `?l` LIKE pattern.
    Like,
    /// `?d` dialect-formatted date, null-aware.
    Date,
    /// `?r` raw SQL.
    Raw,
}

impl PlaceholderKind {
    /// Every supported kind, in token-table order.
    pub const ALL: [Self; 11] = [
        Self::String,
        Self::Integer,
        Self::Float,
        Self::List,
        Self::Assoc,
        Self::MultiRow,
        Self::Table,
        Self::Column,
        Self::Like,
        Self::Date,
        Self::Raw,
    ];

    /// Returns the kind for a token letter (case-sensitive).
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            's' => Some(Self::String),
            'i' => Some(Self::Integer),
            'f' => Some(Self::Float),
            'a' => Some(Self::List),
            'A' => Some(Self::Assoc),
            'M' => Some(Self::MultiRow),
            't' => Some(Self::Table),
            'c' => Some(Self::Column),
            'l' => Some(Self::Like),
            'd' => Some(Self::Date),
            'r' => Some(Self::Raw),
            _ => None,
        }
    }

    /// Returns the token letter.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::String => 's',
            Self::Integer => 'i',
            Self::Float => 'f',
            Self::List => 'a',
            Self::Assoc => 'A',
            Self::MultiRow => 'M',
            Self::Table => 't',
            Self::Column => 'c',
            Self::Like => 'l',
            Self::Date => 'd',
            Self::Raw => 'r',
        }
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.as_char())
    }
}

/// A placeholder with its span in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of placeholder.
    pub kind: PlaceholderKind,
    /// The location of `?` and its letter.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: PlaceholderKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// A piece of a scanned template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Literal SQL copied to the output.
    Text(Span),
    /// A placeholder to substitute.
    Placeholder(Token),
}
