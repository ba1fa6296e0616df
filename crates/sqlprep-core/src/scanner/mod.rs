//! Placeholder scanner
//!
//! This module splits a SQL template into literal text and typed placeholder
//! tokens. It knows nothing about SQL grammar: a token is `?` followed by one
//! placeholder kind letter, wherever it appears. Every other `?` is text.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{PlaceholderKind, Segment, Token};
pub use tokenizer::Scanner;
