//! Identifier validation and quoting.
//!
//! Table names and column names follow two separate grammars. Table names
//! are limited to `[A-Za-z0-9_]`. Column names may additionally contain the
//! dialect's quote character so that already-quoted fragments can be passed
//! through; the character is doubled on output.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::SubstituteError;

static TABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid table name pattern"));

static COLUMN_NAME_BACKTICK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_`]+$").expect("valid column name pattern"));

static COLUMN_NAME_DOUBLE_QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[A-Za-z0-9_"]+$"#).expect("valid column name pattern"));

/// Returns true if `name` matches the table grammar.
#[must_use]
pub fn is_table_name(name: &str) -> bool {
    TABLE_NAME.is_match(name)
}

/// Returns true if `name` matches the column grammar for `quote`.
///
/// Only the backtick and the double quote are dialect quote characters; any
/// other `quote` gets the table grammar.
#[must_use]
pub fn is_column_name(name: &str, quote: char) -> bool {
    match quote {
        '`' => COLUMN_NAME_BACKTICK.is_match(name),
        '"' => COLUMN_NAME_DOUBLE_QUOTE.is_match(name),
        _ => is_table_name(name),
    }
}

/// Validates `name` and wraps it in `quote`, doubling embedded quotes.
///
/// With `allow_quote_char` false the table grammar applies, otherwise the
/// column grammar.
///
/// # Errors
///
/// Returns [`SubstituteError::InvalidIdentifier`] if `name` is empty or
/// contains a character outside the grammar.
pub fn validate_and_escape(
    name: &str,
    quote: char,
    allow_quote_char: bool,
) -> Result<String, SubstituteError> {
    let valid = if allow_quote_char {
        is_column_name(name, quote)
    } else {
        is_table_name(name)
    };
    if !valid {
        return Err(SubstituteError::invalid_identifier(name));
    }
    Ok(escape(name, quote))
}

fn escape(name: &str, quote: char) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push(quote);
    for c in name.chars() {
        if c == quote {
            out.push(quote);
        }
        out.push(c);
    }
    out.push(quote);
    out
}
