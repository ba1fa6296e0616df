#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone, Timelike};
use sqlprep_core::{Dialect, LiteralQuoter, PrepareError, Preparer, Value};

pub fn preparer(dialect: Dialect) -> Preparer<LiteralQuoter> {
    Preparer::new(LiteralQuoter::new(dialect))
}

pub fn mysql() -> Preparer<LiteralQuoter> {
    preparer(Dialect::Mysql)
}

pub fn prepare_with(p: &Preparer<LiteralQuoter>, sql: &str, params: &[Value]) -> String {
    p.prepare(sql, params)
        .unwrap_or_else(|e| panic!("Failed to prepare: {sql}\nError: {e}"))
}

pub fn prepare_err_with(p: &Preparer<LiteralQuoter>, sql: &str, params: &[Value]) -> PrepareError {
    p.prepare(sql, params)
        .expect_err(&format!("Expected prepare error for: {sql}"))
}

pub fn prepare(sql: &str, params: &[Value]) -> String {
    prepare_with(&mysql(), sql, params)
}

pub fn prepare_err(sql: &str, params: &[Value]) -> PrepareError {
    prepare_err_with(&mysql(), sql, params)
}

/// 2024-03-09 14:05:07.250000 at the given UTC offset (in hours).
pub fn timestamp(offset_hours: i32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .and_then(|tz| tz.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).single())
        .and_then(|ts| ts.with_nanosecond(250_000_000))
        .expect("valid timestamp")
}
