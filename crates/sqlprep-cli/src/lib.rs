//! Command-line front end for `sqlprep-core`.
//!
//! The `sqlprep` binary renders typed SQL templates without a database
//! connection, quoting literals with [`LiteralQuoter`] for the selected
//! driver.
//!
//! # CLI Usage
//!
//! ```bash
//! # Render a template for PostgreSQL
//! sqlprep --driver pgsql render 'SELECT * FROM ?t WHERE id IN ?a' --params '["users", [1, 2]]'
//!
//! # Use a table prefix from the environment
//! SQLPREP_PREFIX=shop sqlprep render 'SELECT * FROM ?t' --params '["users"]'
//!
//! # List the placeholders of a template
//! sqlprep scan 'UPDATE ?t SET ?A WHERE id = ?i' --json
//! ```

pub mod error;
pub mod params;

use serde::Serialize;
use sqlprep_core::{LiteralQuoter, PrepareError, Preparer};

/// Builds the preparer for a driver name and table prefix.
///
/// # Errors
///
/// Returns [`PrepareError::InvalidPrefix`] if the prefix is not a valid
/// table name.
pub fn build_preparer(driver: &str, prefix: &str) -> Result<Preparer<LiteralQuoter>, PrepareError> {
    Preparer::new(LiteralQuoter::for_driver(driver)).with_prefix(prefix)
}

/// A placeholder found by `sqlprep scan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEntry {
    /// Zero-based parameter index the placeholder consumes.
    pub index: usize,
    /// Byte offset of the `?`.
    pub position: usize,
    /// The token text, e.g. `?t`.
    pub token: String,
}

/// Lists the placeholders of `template`.
#[must_use]
pub fn scan_entries(preparer: &Preparer<LiteralQuoter>, template: &str) -> Vec<ScanEntry> {
    preparer
        .scan(template)
        .into_iter()
        .enumerate()
        .map(|(index, token)| ScanEntry {
            index,
            position: token.span.start,
            token: token.kind.to_string(),
        })
        .collect()
}
