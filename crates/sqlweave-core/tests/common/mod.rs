#![allow(dead_code)]

use duckdb::types::Value;
use duckdb::{params_from_iter, Connection};
use sqlweave_core::{Dialect, SqlValue, Statement};

/// Counts dialect placeholders in `sql`, skipping single-quoted literals.
///
/// `?` markers are counted one by one; `$N` markers count as distinct
/// indexes, so `$1 ... $1` counts once.
pub fn count_placeholders(sql: &str) -> usize {
    let mut questions = 0;
    let mut numbered = std::collections::BTreeSet::new();
    let mut chars = sql.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                for inner in chars.by_ref() {
                    if inner == '\'' {
                        break;
                    }
                }
            }
            '?' => questions += 1,
            '$' => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                    digits.push(d);
                    chars.next();
                }
                if let Ok(n) = digits.parse::<usize>() {
                    numbered.insert(n);
                }
            }
            _ => {}
        }
    }
    questions + numbered.len()
}

/// Numbered placeholders in textual order, e.g. `[1, 2, 3]`.
pub fn placeholder_indexes(sql: &str) -> Vec<usize> {
    sql.split('$')
        .skip(1)
        .filter_map(|rest| {
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        })
        .collect()
}

/// Builds `stmt` with `dialect` and checks placeholder/argument parity.
pub fn build_checked<S: Statement>(stmt: &S, dialect: &dyn Dialect) -> (String, Vec<SqlValue>) {
    let (sql, params) = stmt
        .build_with(dialect)
        .unwrap_or_else(|e| panic!("build failed with {}: {e}", dialect.name()));
    assert_eq!(
        count_placeholders(&sql),
        params.len(),
        "placeholder/argument mismatch in: {sql}"
    );
    if !dialect.uses_question_marks() {
        let expected: Vec<usize> = (1..=params.len()).collect();
        assert_eq!(placeholder_indexes(&sql), expected, "numbering in: {sql}");
    }
    (sql, params)
}

pub fn to_duckdb(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Bool(b) => Value::Boolean(*b),
        SqlValue::Int(n) => Value::BigInt(*n),
        SqlValue::Float(f) => Value::Double(*f),
        SqlValue::Text(s) => Value::Text(s.clone()),
        SqlValue::Blob(b) => Value::Blob(b.clone()),
    }
}

/// In-memory database with a small users/orders fixture.
pub fn fixture_db() -> Connection {
    let conn = Connection::open_in_memory().expect("open duckdb");
    conn.execute_batch(
        "CREATE TABLE users (id BIGINT PRIMARY KEY, name VARCHAR, age BIGINT, active BOOLEAN, deleted_at VARCHAR);
         CREATE TABLE orders (id BIGINT PRIMARY KEY, user_id BIGINT, total DOUBLE, status VARCHAR);
         INSERT INTO users VALUES
             (1, 'Alice', 34, true, NULL),
             (2, 'Bob', 17, true, NULL),
             (3, 'Carol', 52, false, '2024-01-01'),
             (4, 'Dave', 25, true, NULL);
         INSERT INTO orders VALUES
             (10, 1, 120.0, 'paid'),
             (11, 1, 30.0, 'open'),
             (12, 4, 75.5, 'paid'),
             (13, 3, 10.0, 'paid');",
    )
    .expect("create fixture");
    conn
}

/// Runs a query and collects the first column as `i64`.
pub fn query_ids(conn: &Connection, sql: &str, params: &[SqlValue]) -> Vec<i64> {
    let mut stmt = conn
        .prepare(sql)
        .unwrap_or_else(|e| panic!("prepare failed: {sql}\n{e}"));
    let rows = stmt
        .query_map(params_from_iter(params.iter().map(to_duckdb)), |row| {
            row.get::<_, i64>(0)
        })
        .unwrap_or_else(|e| panic!("query failed: {sql}\n{e}"));
    rows.map(|r| r.expect("row")).collect()
}

/// Runs a statement and returns the affected row count.
pub fn execute(conn: &Connection, sql: &str, params: &[SqlValue]) -> usize {
    conn.execute(sql, params_from_iter(params.iter().map(to_duckdb)))
        .unwrap_or_else(|e| panic!("execute failed: {sql}\n{e}"))
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}
