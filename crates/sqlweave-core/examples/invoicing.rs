//! Invoicing System - Statement Assembly Example
//!
//! This example builds the queries of a small multi-tenant invoicing
//! system and prints each one with its arguments:
//! - Dashboard queries with joins, grouping and subqueries
//! - Reusable filters merged with `compose`
//! - Invoice lifecycle updates (draft -> sent -> paid)
//!
//! Run with: cargo run --example invoicing -- postgres

use sqlweave_core::cond::{self, between, eq, gte, in_list, or};
use sqlweave_core::dialect::DialectKind;
use sqlweave_core::{
    col, delete, insert, select, set_default_dialect, update, Expr, Select, SqlValue, Statement,
};

fn print_sql(title: &str, stmt: &impl Statement) {
    println!("-- {title}");
    match stmt.build() {
        Ok((sql, params)) => {
            println!("{sql};");
            println!("-- args: {params:?}");
        }
        Err(err) => println!("-- error: {err}"),
    }
    println!();
}

/// Invoices of one company, shared by most queries below.
fn company_scope(company_id: i64) -> Select {
    Select::new().where_clause(eq("i.company_id", company_id))
}

fn page(number: u64) -> Select {
    Select::new().limit(25).offset(number * 25)
}

fn main() {
    let dialect: DialectKind = std::env::args()
        .nth(1)
        .and_then(|name| name.parse().ok())
        .unwrap_or_default();
    set_default_dialect(dialect);
    println!("-- dialect: {dialect}");
    println!();

    let company_id = 1_i64;

    // -------------------------------------------------------------------------
    // DASHBOARD QUERIES
    // -------------------------------------------------------------------------

    // 1. Outstanding invoices, newest first
    let outstanding = select(["i.id", "i.invoice_number", "i.total_cents", "i.due_date"])
        .from(col("invoices").alias("i"))
        .where_clause(in_list("i.status", ["sent", "overdue"]))
        .order_by("i.due_date DESC")
        .compose(company_scope(company_id))
        .compose(page(0));
    print_sql("Outstanding invoices", &outstanding);

    // 2. Revenue per client
    let revenue = select([
        col("c.name"),
        Expr::func("COUNT(i.id)").alias("invoice_count"),
        Expr::func("SUM(i.total_cents)").alias("revenue_cents"),
    ])
    .from(col("invoices").alias("i"))
    .join(col("clients").alias("c"), "c.id", "i.client_id")
    .where_clause(eq("i.status", "paid"))
    .group_by(["c.name"])
    .having(cond::raw_with("SUM(i.total_cents) > ?", [1_000_000_i64]))
    .order_by_desc(Expr::raw("SUM(i.total_cents)"))
    .compose(company_scope(company_id));
    print_sql("Revenue per client (> 10,000)", &revenue);

    // 3. Clients without any paid invoice
    let paid = select(["p.client_id"])
        .from(col("invoices").alias("p"))
        .where_clause(eq("p.status", "paid"));
    let dormant = select(["c.id", "c.name"])
        .from(col("clients").alias("c"))
        .where_clause(cond::not_in_subquery("c.id", paid))
        .where_clause(eq("c.company_id", company_id));
    print_sql("Clients without paid invoices", &dormant);

    // 4. Large or foreign-currency invoices in Q1
    let flagged = select(["i.id", "i.currency", "i.total_cents"])
        .from(col("invoices").alias("i"))
        .where_clause(or(gte("i.total_cents", 5_000_000_i64), cond::ne("i.currency", "EUR")))
        .where_clause(between("i.issued_at", "2024-01-01", "2024-03-31"))
        .compose(company_scope(company_id));
    print_sql("Flagged Q1 invoices", &flagged);

    // 5. Line items of the latest invoice
    let latest = select([Expr::func("MAX(id)")])
        .from("invoices")
        .where_clause(eq("company_id", company_id));
    let lines = select(["description", "quantity", "unit_price_cents"])
        .from("invoice_lines")
        .where_clause(cond::in_subquery("invoice_id", latest))
        .order_by_asc("sort_order");
    print_sql("Lines of the latest invoice", &lines);

    // -------------------------------------------------------------------------
    // LIFECYCLE
    // -------------------------------------------------------------------------

    // 6. Create a draft
    let draft = insert("invoices")
        .columns(["company_id", "client_id", "invoice_number", "status", "currency"])
        .values([
            SqlValue::Int(company_id),
            SqlValue::Int(42),
            SqlValue::Text(String::from("INV-2024-0001")),
            SqlValue::Text(String::from("draft")),
            SqlValue::Text(String::from("EUR")),
        ])
        .returning(["id"]);
    print_sql("Create draft invoice", &draft);

    // 7. Mark as paid
    let mark_paid = update("invoices")
        .set("status", "paid")
        .set_raw("paid_at", "CURRENT_TIMESTAMP")
        .where_clause(eq("id", 123))
        .where_clause(eq("status", "sent"));
    print_sql("Mark invoice as paid", &mark_paid);

    // 8. Purge abandoned drafts
    let purge = delete("invoices")
        .where_clause(eq("status", "draft"))
        .where_clause(cond::lt("created_at", "2023-01-01"));
    print_sql("Purge abandoned drafts", &purge);

    // 9. A mistake surfaces at build time
    let broken = select(["id"])
        .from("invoices")
        .where_clause(cond::gt("paid_at", SqlValue::Null));
    print_sql("Invalid NULL comparison", &broken);

    if let Ok(text) = mark_paid.debug_sql() {
        println!("-- debug: {text}");
    }
}
