//! Per-kind substitution rules.
//!
//! [`Substitutor::substitute`] turns one `(kind, value)` pair into the SQL
//! fragment that replaces the placeholder. It is total over
//! [`PlaceholderKind`]; every rule either produces a fragment or a
//! [`SubstituteError`].

use chrono::{DateTime, FixedOffset};

use crate::dialect::Dialect;
use crate::error::SubstituteError;
use crate::identifier::{is_table_name, validate_and_escape};
use crate::quoter::Quoter;
use crate::scanner::PlaceholderKind;
use crate::value::Value;

/// The read-only context a substitution needs.
#[derive(Clone, Copy)]
pub struct Substitutor<'a> {
    quoter: &'a dyn Quoter,
    prefix: &'a str,
    dialect: Dialect,
}

impl<'a> Substitutor<'a> {
    /// Creates a substitutor. `prefix` is assumed to be a valid table name or
    /// empty.
    #[must_use]
    pub const fn new(quoter: &'a dyn Quoter, prefix: &'a str, dialect: Dialect) -> Self {
        Self {
            quoter,
            prefix,
            dialect,
        }
    }

    /// Produces the SQL fragment for a placeholder of `kind` bound to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SubstituteError::TypeMismatch`] if `value` has a shape
    /// `kind` does not accept, and [`SubstituteError::InvalidIdentifier`] if
    /// a table or column name (or a SET-list key) fails validation.
    pub fn substitute(
        &self,
        kind: PlaceholderKind,
        value: &Value,
    ) -> Result<String, SubstituteError> {
        match kind {
            PlaceholderKind::String => self.string(value),
            PlaceholderKind::Integer => integer(value),
            PlaceholderKind::Float => float(value),
            PlaceholderKind::List => self.list(value),
            PlaceholderKind::Assoc => self.assoc(value),
            PlaceholderKind::MultiRow => self.multi_row(value),
            PlaceholderKind::Table => self.table(value),
            PlaceholderKind::Column => self.column(value),
            PlaceholderKind::Like => self.like(value),
            PlaceholderKind::Date => self.date(value),
            PlaceholderKind::Raw => raw(value),
        }
    }

    fn string(&self, value: &Value) -> Result<String, SubstituteError> {
        let text = match value {
            Value::Text(s) => s.clone(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => finite_float(*f)?,
            Value::Bool(b) => bool_text(*b).to_owned(),
            other => return Err(SubstituteError::mismatch("string", other.type_name())),
        };
        Ok(self.quoter.quote(&text))
    }

    /// Renders an element of an IN-list, SET-list or VALUES row.
    fn scalar(&self, value: &Value) -> Result<String, SubstituteError> {
        match value {
            Value::Null => Ok(String::from("NULL")),
            Value::Bool(b) => Ok(bool_text(*b).to_owned()),
            Value::Int(n) => Ok(n.to_string()),
            Value::Float(f) => finite_float(*f),
            Value::Text(s) => Ok(self.quoter.quote(s)),
            Value::Timestamp(ts) => Ok(self.quote_date(ts)),
            Value::Raw(sql) => Ok(sql.to_string()),
            other => Err(SubstituteError::mismatch("scalar", other.type_name())),
        }
    }

    fn scalars(&self, values: &[Value]) -> Result<String, SubstituteError> {
        let parts = values
            .iter()
            .map(|v| self.scalar(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(", "))
    }

    fn list(&self, value: &Value) -> Result<String, SubstituteError> {
        match value {
            // `IN ()` is a syntax error; `IN (NULL)` matches nothing.
            Value::List(items) if items.is_empty() => Ok(String::from("(NULL)")),
            Value::List(items) => Ok(format!("({})", self.scalars(items)?)),
            other => Err(SubstituteError::mismatch("sequence", other.type_name())),
        }
    }

    fn assoc(&self, value: &Value) -> Result<String, SubstituteError> {
        let Value::Map(map) = value else {
            return Err(SubstituteError::mismatch("mapping", value.type_name()));
        };
        if map.is_empty() {
            return Err(SubstituteError::mismatch("non-empty mapping", "empty mapping"));
        }
        let quote = self.dialect.identifier_quote();
        let pairs = map
            .iter()
            .map(|(column, v)| {
                Ok(format!(
                    "{} = {}",
                    validate_and_escape(column, quote, false)?,
                    self.scalar(v)?
                ))
            })
            .collect::<Result<Vec<_>, SubstituteError>>()?;
        Ok(pairs.join(", "))
    }

    fn multi_row(&self, value: &Value) -> Result<String, SubstituteError> {
        let rows: Vec<&[Value]> = match value {
            Value::Rows(rows) => rows.iter().map(Vec::as_slice).collect(),
            Value::List(items) if items.iter().all(|v| matches!(v, Value::List(_))) => items
                .iter()
                .filter_map(|v| match v {
                    Value::List(row) => Some(row.as_slice()),
                    _ => None,
                })
                .collect(),
            other => return Err(SubstituteError::mismatch("rows", other.type_name())),
        };
        let Some(width) = rows.first().map(|row| row.len()) else {
            return Err(SubstituteError::mismatch("non-empty rows", "empty rows"));
        };
        if width == 0 {
            return Err(SubstituteError::mismatch("non-empty rows", "empty row"));
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(SubstituteError::mismatch("rows of equal width", "ragged rows"));
        }
        let rendered = rows
            .iter()
            .map(|row| Ok(format!("({})", self.scalars(row)?)))
            .collect::<Result<Vec<_>, SubstituteError>>()?;
        Ok(rendered.join(", "))
    }

    fn table(&self, value: &Value) -> Result<String, SubstituteError> {
        let Value::Text(name) = value else {
            return Err(SubstituteError::mismatch("identifier string", value.type_name()));
        };
        if !is_table_name(name) {
            return Err(SubstituteError::invalid_identifier(name.as_str()));
        }
        let quote = self.dialect.identifier_quote();
        if self.prefix.is_empty() {
            validate_and_escape(name, quote, false)
        } else {
            validate_and_escape(&format!("{}_{name}", self.prefix), quote, false)
        }
    }

    fn column(&self, value: &Value) -> Result<String, SubstituteError> {
        let Value::Text(name) = value else {
            return Err(SubstituteError::mismatch("identifier string", value.type_name()));
        };
        let quote = self.dialect.identifier_quote();
        let parts = name
            .split('.')
            .map(|part| validate_and_escape(part, quote, true))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| SubstituteError::invalid_identifier(name.as_str()))?;
        Ok(parts.join("."))
    }

    fn like(&self, value: &Value) -> Result<String, SubstituteError> {
        let text = match value {
            Value::Text(s) => s.clone(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => finite_float(*f)?,
            other => return Err(SubstituteError::mismatch("string", other.type_name())),
        };
        let mut pattern = String::with_capacity(text.len() + 2);
        pattern.push('%');
        for c in text.chars() {
            if c == '%' || c == '_' {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Ok(self.quoter.quote(&pattern))
    }

    fn date(&self, value: &Value) -> Result<String, SubstituteError> {
        match value {
            Value::Null => Ok(String::from("NULL")),
            Value::Timestamp(ts) => Ok(self.quote_date(ts)),
            other => Err(SubstituteError::mismatch("timestamp or null", other.type_name())),
        }
    }

    fn quote_date(&self, ts: &DateTime<FixedOffset>) -> String {
        let formatted = ts.format(self.dialect.date_format()).to_string();
        self.quoter.quote(&formatted)
    }
}

const fn bool_text(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

fn finite_float(f: f64) -> Result<String, SubstituteError> {
    if f.is_finite() {
        Ok(format!("{f}"))
    } else {
        Err(SubstituteError::mismatch("finite number", "non-finite float"))
    }
}

/// 2^63, the first float past `i64::MAX`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Truncates toward zero. Values outside the `i64` range are rejected.
#[allow(clippy::cast_possible_truncation)]
fn truncate(f: f64) -> Result<i64, SubstituteError> {
    if !f.is_finite() {
        return Err(SubstituteError::mismatch("finite number", "non-finite float"));
    }
    let t = f.trunc();
    if (-I64_BOUND..I64_BOUND).contains(&t) {
        Ok(t as i64)
    } else {
        Err(SubstituteError::mismatch("integer", "out-of-range number"))
    }
}

fn integer(value: &Value) -> Result<String, SubstituteError> {
    let n = match value {
        Value::Int(n) => *n,
        Value::Float(f) => truncate(*f)?,
        Value::Bool(b) => i64::from(*b),
        Value::Text(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(n) => n,
                Err(_) => s
                    .parse::<f64>()
                    .map_err(|_| SubstituteError::mismatch("integer", "non-numeric string"))
                    .and_then(truncate)?,
            }
        }
        other => return Err(SubstituteError::mismatch("integer", other.type_name())),
    };
    Ok(n.to_string())
}

fn float(value: &Value) -> Result<String, SubstituteError> {
    match value {
        Value::Float(f) => finite_float(*f),
        Value::Int(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(bool_text(*b).to_owned()),
        Value::Text(s) => s
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| SubstituteError::mismatch("float", "non-numeric string"))
            .and_then(finite_float),
        other => Err(SubstituteError::mismatch("float", other.type_name())),
    }
}

fn raw(value: &Value) -> Result<String, SubstituteError> {
    match value {
        Value::Raw(sql) => Ok(sql.to_string()),
        Value::Text(s) => Ok(s.clone()),
        other => Err(SubstituteError::mismatch("raw SQL", other.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quoter::LiteralQuoter;
    use chrono::TimeZone;

    fn sub(kind: PlaceholderKind, value: Value) -> Result<String, SubstituteError> {
        let quoter = LiteralQuoter::new(Dialect::Sqlite);
        Substitutor::new(&quoter, "", Dialect::Sqlite).substitute(kind, &value)
    }

    fn ok(kind: PlaceholderKind, value: Value) -> String {
        sub(kind, value).unwrap_or_else(|e| panic!("Failed to substitute {kind}: {e}"))
    }

    #[test]
    fn test_string() {
        assert_eq!(ok(PlaceholderKind::String, Value::Text("it's".into())), "'it''s'");
        assert_eq!(ok(PlaceholderKind::String, Value::Int(5)), "'5'");
        assert_eq!(
            sub(PlaceholderKind::String, Value::Null),
            Err(SubstituteError::mismatch("string", "null"))
        );
    }

    #[test]
    fn test_integer_truncates() {
        assert_eq!(ok(PlaceholderKind::Integer, Value::Float(3.9)), "3");
        assert_eq!(ok(PlaceholderKind::Integer, Value::Float(-3.9)), "-3");
        assert_eq!(ok(PlaceholderKind::Integer, Value::Text(" 42 ".into())), "42");
        assert_eq!(ok(PlaceholderKind::Integer, Value::Text("7.8".into())), "7");
        assert_eq!(ok(PlaceholderKind::Integer, Value::Bool(true)), "1");
    }

    #[test]
    fn test_integer_rejects_non_numeric() {
        assert_eq!(
            sub(PlaceholderKind::Integer, Value::Text("1; DROP".into())),
            Err(SubstituteError::mismatch("integer", "non-numeric string"))
        );
        assert!(sub(PlaceholderKind::Integer, Value::Float(f64::NAN)).is_err());
        assert!(sub(PlaceholderKind::Integer, Value::Text("inf".into())).is_err());
    }

    #[test]
    fn test_integer_rejects_out_of_range() {
        let out_of_range = Err(SubstituteError::mismatch("integer", "out-of-range number"));
        assert_eq!(
            sub(PlaceholderKind::Integer, Value::Text("9223372036854775808".into())),
            out_of_range
        );
        assert_eq!(sub(PlaceholderKind::Integer, Value::Float(1e30)), out_of_range);
        assert_eq!(sub(PlaceholderKind::Integer, Value::Float(-1e19)), out_of_range);
        assert_eq!(
            ok(PlaceholderKind::Integer, Value::Text("9223372036854775807".into())),
            "9223372036854775807"
        );
        assert_eq!(
            ok(PlaceholderKind::Integer, Value::Float(-9_223_372_036_854_775_808.0)),
            "-9223372036854775808"
        );
    }

    #[test]
    fn test_float() {
        assert_eq!(ok(PlaceholderKind::Float, Value::Text("1,5".into())), "1.5");
        assert_eq!(ok(PlaceholderKind::Float, Value::Text("2.25".into())), "2.25");
        assert_eq!(ok(PlaceholderKind::Float, Value::Float(0.5)), "0.5");
        assert_eq!(ok(PlaceholderKind::Float, Value::Int(3)), "3");
        assert!(sub(PlaceholderKind::Float, Value::Float(f64::INFINITY)).is_err());
        assert!(sub(PlaceholderKind::Float, Value::Text("abc".into())).is_err());
    }

    #[test]
    fn test_list() {
        let list = Value::List(vec![Value::Int(1), Value::Text("a".into()), Value::Null]);
        assert_eq!(ok(PlaceholderKind::List, list), "(1, 'a', NULL)");
        assert_eq!(ok(PlaceholderKind::List, Value::List(Vec::new())), "(NULL)");
    }

    #[test]
    fn test_list_rejects_nested() {
        let nested = Value::List(vec![Value::List(vec![Value::Int(1)])]);
        assert_eq!(
            sub(PlaceholderKind::List, nested),
            Err(SubstituteError::mismatch("scalar", "sequence"))
        );
        assert_eq!(
            sub(PlaceholderKind::List, Value::Int(1)),
            Err(SubstituteError::mismatch("sequence", "integer"))
        );
    }

    #[test]
    fn test_assoc() {
        let map = Value::map([
            ("name", Value::Text("Ann".into())),
            ("age", Value::Int(5)),
            ("active", Value::Bool(false)),
            ("updated", Value::raw("CURRENT_TIMESTAMP")),
        ]);
        assert_eq!(
            ok(PlaceholderKind::Assoc, map),
            "`name` = 'Ann', `age` = 5, `active` = 0, `updated` = CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_assoc_rejects_bad_key_and_empty() {
        let map = Value::map([("a = 1, b", 2)]);
        assert_eq!(
            sub(PlaceholderKind::Assoc, map),
            Err(SubstituteError::invalid_identifier("a = 1, b"))
        );
        assert_eq!(
            sub(PlaceholderKind::Assoc, Value::map(Vec::<(String, i64)>::new())),
            Err(SubstituteError::mismatch("non-empty mapping", "empty mapping"))
        );
    }

    #[test]
    fn test_multi_row_accepts_nested_lists() {
        let rows = Value::List(vec![
            Value::List(vec![Value::Int(1), Value::Text("a".into())]),
            Value::List(vec![Value::Int(2), Value::Text("b".into())]),
        ]);
        assert_eq!(ok(PlaceholderKind::MultiRow, rows), "(1, 'a'), (2, 'b')");
    }

    #[test]
    fn test_multi_row_rejects_ragged_and_empty() {
        let ragged = Value::rows([vec![1, 2], vec![3]]);
        assert_eq!(
            sub(PlaceholderKind::MultiRow, ragged),
            Err(SubstituteError::mismatch("rows of equal width", "ragged rows"))
        );
        assert!(sub(PlaceholderKind::MultiRow, Value::Rows(Vec::new())).is_err());
        assert!(sub(PlaceholderKind::MultiRow, Value::Rows(vec![Vec::new()])).is_err());
        assert!(sub(PlaceholderKind::MultiRow, Value::List(vec![Value::Int(1)])).is_err());
    }

    #[test]
    fn test_table_with_prefix() {
        let quoter = LiteralQuoter::new(Dialect::Pgsql);
        let s = Substitutor::new(&quoter, "shop", Dialect::Pgsql);
        assert_eq!(
            s.substitute(PlaceholderKind::Table, &Value::Text("users".into())),
            Ok(String::from("\"shop_users\""))
        );
    }

    #[test]
    fn test_column() {
        assert_eq!(ok(PlaceholderKind::Column, Value::Text("name".into())), "`name`");
        assert_eq!(
            ok(PlaceholderKind::Column, Value::Text("users.name".into())),
            "`users`.`name`"
        );
        assert_eq!(ok(PlaceholderKind::Column, Value::Text("a`b".into())), "`a``b`");
        assert_eq!(
            sub(PlaceholderKind::Column, Value::Text("users.".into())),
            Err(SubstituteError::invalid_identifier("users."))
        );
    }

    #[test]
    fn test_like() {
        assert_eq!(
            ok(PlaceholderKind::Like, Value::Text("50% off".into())),
            r"'%50\% off%'"
        );
        assert_eq!(
            ok(PlaceholderKind::Like, Value::Text("a_b'c".into())),
            r"'%a\_b''c%'"
        );
    }

    #[test]
    fn test_date() {
        let ts = FixedOffset::east_opt(3600)
            .and_then(|tz| tz.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).single())
            .expect("valid timestamp");
        assert_eq!(
            ok(PlaceholderKind::Date, Value::Timestamp(ts)),
            "'2024-05-06 07:08:09'"
        );
        assert_eq!(ok(PlaceholderKind::Date, Value::Null), "NULL");
        assert_eq!(
            sub(PlaceholderKind::Date, Value::Text("2024-05-06".into())),
            Err(SubstituteError::mismatch("timestamp or null", "string"))
        );
    }

    #[test]
    fn test_raw() {
        assert_eq!(ok(PlaceholderKind::Raw, Value::raw("NOW()")), "NOW()");
        assert_eq!(ok(PlaceholderKind::Raw, Value::Text("a'b".into())), "a'b");
        assert!(sub(PlaceholderKind::Raw, Value::Int(1)).is_err());
    }
}
