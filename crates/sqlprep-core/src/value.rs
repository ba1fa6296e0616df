//! Parameter values.
//!
//! A [`Value`] is the caller's side of a placeholder. Each placeholder kind
//! accepts a specific set of shapes; the caller picks the shape explicitly, so
//! an IN-list ([`Value::List`]) can never be mistaken for a SET-list
//! ([`Value::Map`]).

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use indexmap::IndexMap;

/// SQL text inserted verbatim by the `?r` placeholder.
///
/// Wrapping text in `RawSql` is the only way to bypass escaping, which keeps
/// every raw injection visible at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawSql(String);

impl RawSql {
    /// Wraps SQL text that must not be escaped.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    /// Returns the wrapped SQL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwraps the SQL text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RawSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parameter value bound to a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Ordered sequence of scalars, for IN-lists.
    List(Vec<Value>),
    /// Ordered column-to-value mapping, for SET-lists.
    Map(IndexMap<String, Value>),
    /// Rows of scalars, for multi-row inserts.
    Rows(Vec<Vec<Value>>),
    /// Calendar timestamp.
    Timestamp(DateTime<FixedOffset>),
    /// Unescaped SQL.
    Raw(RawSql),
}

impl Value {
    /// Returns a short description of the value's shape, used in errors.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
            Self::List(_) => "sequence",
            Self::Map(_) => "mapping",
            Self::Rows(_) => "rows",
            Self::Timestamp(_) => "timestamp",
            Self::Raw(_) => "raw SQL",
        }
    }

    /// Returns true for every shape that is not a collection.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Map(_) | Self::Rows(_))
    }

    /// Builds a raw SQL value.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(RawSql::new(sql))
    }

    /// Builds a mapping from `(column, value)` pairs, keeping their order.
    #[must_use]
    pub fn map<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: ToValue,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_value()))
                .collect(),
        )
    }

    /// Builds rows for a multi-row insert.
    #[must_use]
    pub fn rows<R, V>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = V>,
        V: ToValue,
    {
        Self::Rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(ToValue::to_value).collect())
                .collect(),
        )
    }
}

/// Trait for types that can be converted to parameter values.
pub trait ToValue {
    /// Converts the value to a [`Value`].
    fn to_value(self) -> Value;
}

impl ToValue for Value {
    fn to_value(self) -> Value {
        self
    }
}

impl ToValue for bool {
    fn to_value(self) -> Value {
        Value::Bool(self)
    }
}

impl ToValue for i64 {
    fn to_value(self) -> Value {
        Value::Int(self)
    }
}

impl ToValue for i32 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for i16 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for i8 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for u32 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for u16 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for u8 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for f64 {
    fn to_value(self) -> Value {
        Value::Float(self)
    }
}

impl ToValue for f32 {
    fn to_value(self) -> Value {
        Value::Float(f64::from(self))
    }
}

impl ToValue for String {
    fn to_value(self) -> Value {
        Value::Text(self)
    }
}

impl ToValue for &str {
    fn to_value(self) -> Value {
        Value::Text(String::from(self))
    }
}

impl ToValue for RawSql {
    fn to_value(self) -> Value {
        Value::Raw(self)
    }
}

impl<Tz: TimeZone> ToValue for DateTime<Tz> {
    fn to_value(self) -> Value {
        Value::Timestamp(self.fixed_offset())
    }
}

/// Naive timestamps are taken to be UTC.
impl ToValue for NaiveDateTime {
    fn to_value(self) -> Value {
        Value::Timestamp(self.and_utc().fixed_offset())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(self) -> Value {
        Value::List(self.into_iter().map(ToValue::to_value).collect())
    }
}

impl<K: Into<String>, T: ToValue> ToValue for IndexMap<K, T> {
    fn to_value(self) -> Value {
        Value::map(self)
    }
}
