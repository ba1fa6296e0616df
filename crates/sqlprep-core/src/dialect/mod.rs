//! SQL dialect support.
//!
//! Database drivers disagree on how timestamps should be written and which
//! character delimits identifiers. This module maps the driver names
//! reported by a connection onto a closed set of dialects.

use std::fmt;

/// Second resolution, no timezone.
const PLAIN_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Microseconds with a `+hh:mm` offset.
const PGSQL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f%:z";
/// Microseconds, no timezone (`datetime2`).
const SQLSRV_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A database driver dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// PostgreSQL.
    Pgsql,
    /// MySQL and MariaDB.
    #[default]
    Mysql,
    /// SQLite.
    Sqlite,
    /// Microsoft SQL Server through the native driver.
    Sqlsrv,
    /// Sybase / SQL Server through `DB-Library`.
    Dblib,
    /// CUBRID.
    Cubrid,
}

impl Dialect {
    /// All recognized dialects.
    pub const ALL: [Self; 6] = [
        Self::Pgsql,
        Self::Mysql,
        Self::Sqlite,
        Self::Sqlsrv,
        Self::Dblib,
        Self::Cubrid,
    ];

    /// Looks up a dialect by driver name (case-insensitive).
    #[must_use]
    pub fn from_driver(driver: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dialect| dialect.name().eq_ignore_ascii_case(driver.trim()))
    }

    /// Looks up a dialect by driver name, falling back to [`Dialect::Mysql`].
    #[must_use]
    pub fn resolve(driver: &str) -> Self {
        Self::from_driver(driver).unwrap_or_default()
    }

    /// Returns the driver name of the dialect.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pgsql => "pgsql",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
            Self::Sqlsrv => "sqlsrv",
            Self::Dblib => "dblib",
            Self::Cubrid => "cubrid",
        }
    }

    /// Returns the `chrono` format pattern used for date literals.
    #[must_use]
    pub const fn date_format(self) -> &'static str {
        match self {
            Self::Pgsql => PGSQL_DATE_FORMAT,
            Self::Sqlsrv => SQLSRV_DATE_FORMAT,
            Self::Mysql | Self::Sqlite | Self::Dblib | Self::Cubrid => PLAIN_DATE_FORMAT,
        }
    }

    /// Returns the identifier quote character.
    #[must_use]
    pub const fn identifier_quote(self) -> char {
        match self {
            Self::Pgsql | Self::Sqlsrv | Self::Dblib => '"',
            Self::Mysql | Self::Sqlite | Self::Cubrid => '`',
        }
    }

    /// Returns whether string literals use backslash escapes.
    #[must_use]
    pub const fn uses_backslash_escapes(self) -> bool {
        matches!(self, Self::Mysql | Self::Cubrid)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the date format for a driver name, using MySQL's for unknown drivers.
#[must_use]
pub fn date_format_for(driver: &str) -> &'static str {
    Dialect::resolve(driver).date_format()
}
