//! Scalar string quoting.
//!
//! Correct quoting of a string literal depends on the driver and on server
//! settings, so the engine delegates it to a [`Quoter`]. A live connection
//! layer can implement the trait directly; [`LiteralQuoter`] covers the two
//! escape conventions found in practice.

use std::sync::Arc;

use crate::dialect::Dialect;

/// The capability the engine needs from a database connection.
pub trait Quoter: Send + Sync {
    /// Returns `value` as a complete, safely quoted SQL string literal.
    fn quote(&self, value: &str) -> String;

    /// Returns the dialect of the underlying driver.
    fn active_dialect(&self) -> Dialect;
}

impl<Q: Quoter + ?Sized> Quoter for &Q {
    fn quote(&self, value: &str) -> String {
        (**self).quote(value)
    }

    fn active_dialect(&self) -> Dialect {
        (**self).active_dialect()
    }
}

impl<Q: Quoter + ?Sized> Quoter for Box<Q> {
    fn quote(&self, value: &str) -> String {
        (**self).quote(value)
    }

    fn active_dialect(&self) -> Dialect {
        (**self).active_dialect()
    }
}

impl<Q: Quoter + ?Sized> Quoter for Arc<Q> {
    fn quote(&self, value: &str) -> String {
        (**self).quote(value)
    }

    fn active_dialect(&self) -> Dialect {
        (**self).active_dialect()
    }
}

/// How single-quoted literals escape special characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeStyle {
    /// ANSI SQL: a single quote is written as two single quotes.
    Standard,
    /// MySQL style: backslash escapes for quotes, backslashes and control bytes.
    Backslash,
}

impl EscapeStyle {
    /// Returns the escape style a dialect uses by default.
    #[must_use]
    pub const fn for_dialect(dialect: Dialect) -> Self {
        if dialect.uses_backslash_escapes() {
            Self::Backslash
        } else {
            Self::Standard
        }
    }
}

/// A connection-free [`Quoter`] for a fixed dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralQuoter {
    dialect: Dialect,
    style: EscapeStyle,
}

impl LiteralQuoter {
    /// Creates a quoter using the dialect's default escape style.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            style: EscapeStyle::for_dialect(dialect),
        }
    }

    /// Creates a quoter for a driver name; unknown drivers get MySQL behavior.
    #[must_use]
    pub fn for_driver(driver: &str) -> Self {
        Self::new(Dialect::resolve(driver))
    }

    /// Overrides the escape style, e.g. for MySQL in `NO_BACKSLASH_ESCAPES` mode.
    #[must_use]
    pub const fn with_style(mut self, style: EscapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the escape style in use.
    #[must_use]
    pub const fn style(&self) -> EscapeStyle {
        self.style
    }

    /// Reverses [`Quoter::quote`], returning `None` if `literal` is not a
    /// well-formed literal in this quoter's style.
    #[must_use]
    pub fn unquote(&self, literal: &str) -> Option<String> {
        let inner = literal.strip_prefix('\'')?.strip_suffix('\'')?;
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            match (self.style, c) {
                (EscapeStyle::Standard, '\'') => {
                    if chars.next() != Some('\'') {
                        return None;
                    }
                    out.push('\'');
                }
                (EscapeStyle::Backslash, '\\') => out.push(match chars.next()? {
                    '0' => '\0',
                    'n' => '\n',
                    'r' => '\r',
                    'Z' => '\x1a',
                    other => other,
                }),
                (EscapeStyle::Backslash, '\'') => return None,
                (_, other) => out.push(other),
            }
        }
        Some(out)
    }
}

impl Quoter for LiteralQuoter {
    fn quote(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        match self.style {
            EscapeStyle::Standard => {
                for c in value.chars() {
                    if c == '\'' {
                        out.push('\'');
                    }
                    out.push(c);
                }
            }
            EscapeStyle::Backslash => {
                for c in value.chars() {
                    match c {
                        '\0' => out.push_str("\\0"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\x1a' => out.push_str("\\Z"),
                        '\\' | '\'' | '"' => {
                            out.push('\\');
                            out.push(c);
                        }
                        _ => out.push(c),
                    }
                }
            }
        }
        out.push('\'');
        out
    }

    fn active_dialect(&self) -> Dialect {
        self.dialect
    }
}
