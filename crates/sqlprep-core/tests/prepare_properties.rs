//! Tests for the invariants that hold across all placeholder kinds.

mod common;
use common::*;

use sqlprep_core::{Dialect, LiteralQuoter, PlaceholderKind, PrepareError, ToValue, Value};

/// One template fragment and a matching parameter per kind.
fn sample(kind: PlaceholderKind) -> (&'static str, Value) {
    match kind {
        PlaceholderKind::String => ("?s", "text".to_value()),
        PlaceholderKind::Integer => ("?i", 1.to_value()),
        PlaceholderKind::Float => ("?f", 1.5.to_value()),
        PlaceholderKind::List => ("?a", vec![1, 2].to_value()),
        PlaceholderKind::Assoc => ("?A", Value::map([("a", 1)])),
        PlaceholderKind::MultiRow => ("?M", Value::rows([vec![1, 2]])),
        PlaceholderKind::Table => ("?t", "users".to_value()),
        PlaceholderKind::Column => ("?c", "name".to_value()),
        PlaceholderKind::Like => ("?l", "abc".to_value()),
        PlaceholderKind::Date => ("?d", Value::Null),
        PlaceholderKind::Raw => ("?r", Value::raw("1")),
    }
}

#[test]
fn every_kind_substitutes_without_leftover_tokens() {
    let p = mysql();
    for kind in PlaceholderKind::ALL {
        let (token, value) = sample(kind);
        let template = format!("SELECT {token}, {token} FROM dual");
        let sql = prepare_with(&p, &template, &[value.clone(), value]);
        let tokens = p.scan(&sql);
        assert!(tokens.is_empty(), "{kind} left tokens in {sql}");
    }
}

#[test]
fn all_kinds_in_one_template() {
    let (tokens, params): (Vec<_>, Vec<_>) = PlaceholderKind::ALL.into_iter().map(sample).unzip();
    let template = tokens.join(" | ");
    let sql = prepare(&template, &params);
    assert_eq!(
        sql,
        "'text' | 1 | 1.5 | (1, 2) | `a` = 1 | (1, 2) | `users` | `name` | '%abc%' | NULL | 1"
    );
}

#[test]
fn too_few_params() {
    assert_eq!(
        prepare_err("SELECT ?i, ?s, ?t", &[1.to_value(), "a".to_value()]),
        PrepareError::PlaceholderCountMismatch {
            placeholders: 3,
            params: 2,
            template: String::from("SELECT ?i, ?s, ?t"),
        }
    );
}

#[test]
fn too_many_params() {
    let err = prepare_err("SELECT ?i", &[1.to_value(), 2.to_value()]);
    assert!(matches!(
        err,
        PrepareError::PlaceholderCountMismatch {
            placeholders: 1,
            params: 2,
            ..
        }
    ));
}

#[test]
fn count_checked_before_substitution() {
    // The bad table name is never looked at.
    let err = prepare_err("SELECT * FROM ?t WHERE a = ?i", &["x; y".to_value()]);
    assert!(matches!(err, PrepareError::PlaceholderCountMismatch { .. }));
}

#[test]
fn template_without_placeholders_is_unchanged() {
    let sql = "SELECT a FROM b WHERE c = ? AND d ?| array['x']";
    assert_eq!(prepare(sql, &[]), sql);
}

#[test]
fn question_mark_before_other_letters_is_text() {
    assert_eq!(
        prepare(
            "SELECT * FROM t WHERE note = 'really?Yes' AND id = ?i",
            &[1.to_value()]
        ),
        "SELECT * FROM t WHERE note = 'really?Yes' AND id = 1"
    );
    let err = prepare_err("SELECT ?i, ?S", &[1.to_value(), "a".to_value()]);
    assert!(matches!(
        err,
        PrepareError::PlaceholderCountMismatch {
            placeholders: 1,
            params: 2,
            ..
        }
    ));
}

#[test]
fn double_question_mark_is_left_alone() {
    assert_eq!(prepare("SELECT 'a??b' AS q", &[]), "SELECT 'a??b' AS q");
    assert_eq!(
        prepare("SELECT ?i WHERE data ?? 'k'", &[7.to_value()]),
        "SELECT 7 WHERE data ?? 'k'"
    );
}

#[test]
fn raw_is_identity() {
    let p = mysql();
    let fragment = prepare_with(
        &p,
        "?t.?c IN ?a",
        &["users".to_value(), "id".to_value(), vec!["a'b", "c"].to_value()],
    );
    assert_eq!(prepare_with(&p, "?r", &[Value::raw(fragment.clone())]), fragment);
    assert_eq!(prepare_with(&p, "?r", &[fragment.clone().to_value()]), fragment);
}

#[test]
fn string_round_trips_through_unquote() {
    let samples = [
        "plain",
        "O'Brien",
        "''",
        "'; DROP TABLE users; --",
        r"back\slash\'",
        "?s ?i ?t",
        "line\nbreak\r\0",
        "\"double\" `tick`",
        "ünïcödé",
    ];
    for dialect in Dialect::ALL {
        let quoter = LiteralQuoter::new(dialect);
        let p = preparer(dialect);
        for sample in samples {
            let sql = prepare_with(&p, "?s", &[sample.to_value()]);
            assert_eq!(
                quoter.unquote(&sql).as_deref(),
                Some(sample),
                "{dialect}: {sql}"
            );
        }
    }
}

#[test]
fn first_failing_param_is_reported() {
    let err = prepare_err(
        "SELECT ?c FROM ?t WHERE id = ?i",
        &["ok".to_value(), "bad name".to_value(), "nan".to_value()],
    );
    assert_eq!(
        err,
        PrepareError::InvalidIdentifier {
            index: 1,
            kind: PlaceholderKind::Table,
            name: String::from("bad name"),
            template: String::from("SELECT ?c FROM ?t WHERE id = ?i"),
        }
    );
}

#[test]
fn preparer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<sqlprep_core::Preparer<LiteralQuoter>>();

    let p = std::sync::Arc::new(mysql());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let p = std::sync::Arc::clone(&p);
            std::thread::spawn(move || p.prepare("SELECT ?i", &[i.to_value()]))
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Ok(format!("SELECT {i}")));
    }
}
