//! Invoicing System - Typed Template Example
//!
//! This example prepares the queries of a small multi-tenant invoicing
//! system with typed placeholders:
//! - Per-tenant table prefixes (`?t`)
//! - IN-lists and SET-lists (`?a`, `?A`)
//! - Bulk inserts of invoice lines (`?M`)
//! - Dialect-aware timestamps (`?d`)
//!
//! Run with: cargo run --example invoicing

use chrono::{FixedOffset, TimeZone};
use sqlprep_core::{Dialect, LiteralQuoter, Preparer, PrepareError, RawSql, ToValue, Value};

// =============================================================================
// HELPERS
// =============================================================================

fn print_sql(description: &str, sql: &str) {
    println!("-- {description}");
    println!("{sql};");
    println!();
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> Result<(), PrepareError> {
    println!("-- =============================================================================");
    println!("-- INVOICING SYSTEM - SQL QUERIES");
    println!("-- =============================================================================");
    println!();

    let tz = FixedOffset::east_opt(2 * 3600).expect("valid offset");
    let issued_at = tz
        .with_ymd_and_hms(2024, 1, 15, 9, 30, 0)
        .single()
        .expect("valid timestamp");

    for dialect in [Dialect::Mysql, Dialect::Pgsql] {
        println!("-- Dialect: {dialect}");
        println!("-- ------------------");
        println!();

        let preparer = Preparer::new(LiteralQuoter::new(dialect)).with_prefix("acme")?;

        // 1. Open invoices of selected clients
        let sql = preparer.prepare(
            "SELECT ?c, ?c FROM ?t WHERE client_id IN ?a AND status = ?s",
            &[
                "invoice_number".to_value(),
                "total_cents".to_value(),
                "invoices".to_value(),
                vec![3, 5, 8].to_value(),
                "sent".to_value(),
            ],
        )?;
        print_sql("Open invoices for clients 3, 5 and 8", &sql);

        // 2. Client search
        let sql = preparer.prepare(
            "SELECT id, name FROM ?t WHERE name LIKE ?l ORDER BY ?c LIMIT ?i",
            &[
                "clients".to_value(),
                "100% Organic_Farms".to_value(),
                "clients.name".to_value(),
                "25".to_value(),
            ],
        )?;
        print_sql("Clients matching a name with wildcard characters", &sql);

        // 3. Mark an invoice as paid
        let sql = preparer.prepare(
            "UPDATE ?t SET ?A WHERE id = ?i",
            &[
                "invoices".to_value(),
                Value::map([
                    ("status", "paid".to_value()),
                    ("paid_at", issued_at.to_value()),
                    ("updated_at", RawSql::new("CURRENT_TIMESTAMP").to_value()),
                ]),
                123.to_value(),
            ],
        )?;
        print_sql("Mark invoice 123 as paid", &sql);

        // 4. Insert invoice lines
        let sql = preparer.prepare(
            "INSERT INTO ?t (invoice_id, description, quantity, unit_price) VALUES ?M",
            &[
                "invoice_lines".to_value(),
                Value::rows([
                    vec![123.to_value(), "Consulting".to_value(), 8.to_value(), 12.5.to_value()],
                    vec![123.to_value(), "Travel".to_value(), 1.to_value(), 80.0.to_value()],
                ]),
            ],
        )?;
        print_sql("Insert two lines for invoice 123", &sql);

        // 5. Invoices issued after a date, with optional due date
        let sql = preparer.prepare(
            "SELECT id FROM ?t WHERE issued_at >= ?d AND due_at IS NOT DISTINCT FROM ?d",
            &["invoices".to_value(), issued_at.to_value(), Value::Null],
        )?;
        print_sql("Invoices issued since 2024-01-15 without due date", &sql);
    }

    Ok(())
}
