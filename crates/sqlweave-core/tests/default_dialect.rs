//! The process-wide default dialect.
//!
//! Every test here mutates global state, so they share one lock and live in
//! their own test binary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use sqlweave_core::cond::{eq, gt};
use sqlweave_core::dialect::{MySqlDialect, PostgresDialect};
use sqlweave_core::{default_dialect, select, set_default_dialect, Select, Statement};

static GLOBAL: Mutex<()> = Mutex::new(());

fn statement() -> Select {
    select(["id"])
        .from("users")
        .where_clause(eq("active", true))
        .where_clause(gt("age", 18))
}

const MYSQL_SQL: &str = "SELECT `id` FROM `users` WHERE active = ? AND age > ?";
const POSTGRES_SQL: &str = "SELECT \"id\" FROM \"users\" WHERE active = $1 AND age > $2";

#[test]
fn default_is_used_without_override() {
    let _guard = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);

    set_default_dialect(PostgresDialect);
    assert_eq!(default_dialect().name(), "postgres");
    assert_eq!(statement().build().unwrap().0, POSTGRES_SQL);

    set_default_dialect(MySqlDialect);
    assert_eq!(statement().build().unwrap().0, MYSQL_SQL);
}

#[test]
fn override_ignores_default() {
    let _guard = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);

    set_default_dialect(MySqlDialect);
    let stmt = statement().with_dialect(PostgresDialect);
    assert_eq!(stmt.build().unwrap().0, POSTGRES_SQL);
    assert!(stmt.debug_sql().unwrap().contains("age > 18"));
}

/// Each build sees exactly one dialect even while another thread keeps
/// switching the default, and a pinned statement never follows the switch.
/// That a switch is observed at all is covered by
/// `default_is_used_without_override`.
#[test]
fn switching_mid_flight_keeps_each_build_consistent() {
    let _guard = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);

    set_default_dialect(MySqlDialect);
    let stop = AtomicBool::new(false);
    let shared = statement();
    let pinned = statement().with_dialect(PostgresDialect);

    thread::scope(|s| {
        let toggler = s.spawn(|| {
            for i in 0..200 {
                if i % 2 == 0 {
                    set_default_dialect(PostgresDialect);
                } else {
                    set_default_dialect(MySqlDialect);
                }
                thread::yield_now();
            }
            stop.store(true, Ordering::SeqCst);
        });

        let builders: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| loop {
                    let (sql, params) = shared.build().unwrap();
                    assert_eq!(params.len(), 2);
                    assert!(
                        sql == MYSQL_SQL || sql == POSTGRES_SQL,
                        "inconsistent build: {sql}"
                    );
                    assert_eq!(pinned.build().unwrap().0, POSTGRES_SQL);
                    if stop.load(Ordering::SeqCst) {
                        break;
                    }
                })
            })
            .collect();

        toggler.join().unwrap();
        for builder in builders {
            builder.join().unwrap();
        }
    });

    set_default_dialect(MySqlDialect);
    assert_eq!(shared.build().unwrap().0, MYSQL_SQL);
}
