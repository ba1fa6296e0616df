//! The substitution driver.

use tracing::{debug, trace};

use crate::dialect::Dialect;
use crate::error::{PrepareError, Result};
use crate::identifier::is_table_name;
use crate::quoter::Quoter;
use crate::scanner::{Scanner, Segment, Token};
use crate::substitute::Substitutor;
use crate::value::Value;

/// Prepares SQL templates against a fixed quoting context.
///
/// A `Preparer` holds no mutable state. Build it once per connection and
/// share it; it is `Send + Sync` whenever the quoter is.
///
/// # Example
///
/// ```rust
/// use sqlprep_core::{Dialect, LiteralQuoter, Preparer, ToValue, Value};
///
/// let preparer = Preparer::new(LiteralQuoter::new(Dialect::Mysql))
///     .with_prefix("shop")
///     .unwrap();
///
/// let sql = preparer
///     .prepare(
///         "SELECT * FROM ?t WHERE id IN ?a AND name LIKE ?l",
///         &["users".to_value(), vec![1, 2, 3].to_value(), "ann".to_value()],
///     )
///     .unwrap();
///
/// assert_eq!(
///     sql,
///     "SELECT * FROM `shop_users` WHERE id IN (1, 2, 3) AND name LIKE '%ann%'"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Preparer<Q> {
    quoter: Q,
    prefix: String,
    dialect: Dialect,
}

impl<Q: Quoter> Preparer<Q> {
    /// Creates a preparer with no table prefix. The dialect is read from the
    /// quoter once.
    #[must_use]
    pub fn new(quoter: Q) -> Self {
        let dialect = quoter.active_dialect();
        Self {
            quoter,
            prefix: String::new(),
            dialect,
        }
    }

    /// Sets the table prefix. An empty prefix disables prefixing.
    ///
    /// # Errors
    ///
    /// Returns [`PrepareError::InvalidPrefix`] if the prefix is not empty and
    /// not a valid table name.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if !prefix.is_empty() && !is_table_name(&prefix) {
            return Err(PrepareError::InvalidPrefix { prefix });
        }
        self.prefix = prefix;
        Ok(self)
    }

    /// Returns the table prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Returns the quoter.
    #[must_use]
    pub const fn quoter(&self) -> &Q {
        &self.quoter
    }

    /// Returns the type dispatcher for this context.
    #[must_use]
    pub fn substitutor(&self) -> Substitutor<'_> {
        Substitutor::new(&self.quoter, &self.prefix, self.dialect)
    }

    /// Returns the placeholders of `template` in order.
    #[must_use]
    pub fn scan(&self, template: &str) -> Vec<Token> {
        Scanner::new(template)
            .scan()
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(token) => Some(token),
                Segment::Text(_) => None,
            })
            .collect()
    }

    /// Substitutes `params` into `template`, pairing them with placeholders
    /// by position.
    ///
    /// # Errors
    ///
    /// - [`PrepareError::PlaceholderCountMismatch`] if the number of
    ///   placeholders differs from `params.len()`;
    /// - [`PrepareError::TypeMismatch`] or [`PrepareError::InvalidIdentifier`]
    ///   for the first parameter that cannot be substituted.
    pub fn prepare(&self, template: &str, params: &[Value]) -> Result<String> {
        let segments = Scanner::new(template).scan();
        let placeholders = segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Placeholder(_)))
            .count();
        let count_mismatch = || PrepareError::PlaceholderCountMismatch {
            placeholders,
            params: params.len(),
            template: String::from(template),
        };
        if placeholders != params.len() {
            return Err(count_mismatch());
        }

        let substitutor = self.substitutor();
        let mut values = params.iter().enumerate();
        let mut out = String::with_capacity(template.len());
        for segment in segments {
            match segment {
                Segment::Text(span) => out.push_str(span.slice(template)),
                Segment::Placeholder(token) => {
                    let (index, value) = values.next().ok_or_else(count_mismatch)?;
                    trace!(index, kind = %token.kind, "substituting placeholder");
                    let fragment = substitutor
                        .substitute(token.kind, value)
                        .map_err(|e| e.at(index, token.kind, template))?;
                    out.push_str(&fragment);
                }
            }
        }

        debug!(placeholders, dialect = %self.dialect, "prepared template");
        Ok(out)
    }
}
