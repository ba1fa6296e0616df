//! # sqlprep-core
//!
//! Typed SQL templating with injection-safe substitution.
//!
//! A template is ordinary SQL containing typed placeholders such as `?s` or
//! `?t`. [`Preparer::prepare`] pairs them by position with [`Value`]s and
//! produces a complete SQL string in which every value has been quoted,
//! escaped or validated according to its placeholder kind.
//!
//! | token | substitution |
//! |-------|--------------|
//! | `?s`  | quoted string |
//! | `?i`  | integer (truncated) |
//! | `?f`  | float (`,` or `.` decimal separator) |
//! | `?a`  | `(v1, v2, ...)` for IN-clauses |
//! | `?A`  | `` `col` = v, ... `` for SET-clauses |
//! | `?M`  | `(a, b), (c, d)` for multi-row inserts |
//! | `?t`  | prefixed, quoted table name |
//! | `?c`  | quoted column name |
//! | `?l`  | `'%...%'` LIKE pattern with `%` and `_` escaped |
//! | `?d`  | dialect-formatted timestamp, or `NULL` |
//! | `?r`  | raw SQL, unescaped |
//!
//! Any other `?` (a bare `?`, `??`, `?x`) is left in the SQL as written.
//!
//! ## SQL Injection Prevention
//!
//! ```rust
//! use sqlprep_core::{Dialect, LiteralQuoter, Preparer, PrepareError, ToValue};
//!
//! let preparer = Preparer::new(LiteralQuoter::new(Dialect::Sqlite));
//!
//! let sql = preparer
//!     .prepare(
//!         "SELECT id FROM ?t WHERE name = ?s",
//!         &["users".to_value(), "'; DROP TABLE users; --".to_value()],
//!     )
//!     .unwrap();
//! assert_eq!(sql, "SELECT id FROM `users` WHERE name = '''; DROP TABLE users; --'");
//!
//! // Identifiers must match an allow-list grammar.
//! let err = preparer
//!     .prepare("SELECT * FROM ?t", &["users; DROP TABLE x".to_value()])
//!     .unwrap_err();
//! assert!(matches!(err, PrepareError::InvalidIdentifier { .. }));
//! ```
//!
//! Raw SQL requires the dedicated [`RawSql`] wrapper (or a plain string bound
//! to `?r`), so every unescaped fragment is visible in the template.

pub mod dialect;
pub mod error;
pub mod identifier;
pub mod preparer;
pub mod quoter;
pub mod scanner;
pub mod substitute;
pub mod value;

pub use dialect::{date_format_for, Dialect};
pub use error::{PrepareError, Result, SubstituteError};
pub use preparer::Preparer;
pub use quoter::{EscapeStyle, LiteralQuoter, Quoter};
pub use scanner::{PlaceholderKind, Scanner, Segment, Span, Token};
pub use substitute::Substitutor;
pub use value::{RawSql, ToValue, Value};
