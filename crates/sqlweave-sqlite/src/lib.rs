//! # sqlweave-sqlite
//!
//! SQLite-specific extensions for `sqlweave-core`.
//!
//! # How SQLite differs from other dialects
//!
//! - **[UPSERT]**: SQLite supports
//!   `INSERT ... ON CONFLICT DO NOTHING` and
//!   `ON CONFLICT DO UPDATE SET ...` (since SQLite 3.24.0). This
//!   crate provides [`Upsert`] on top of the core `Insert`.
//! - **[RETURNING]**: SQLite supports `RETURNING` clauses on
//!   INSERT, UPDATE, and DELETE (since SQLite 3.35.0).
//! - **Identifier quoting**: SQLite uses double quotes (`"`) as
//!   the standard quoting style, though it also accepts backticks
//!   and square brackets. See [SQLite keywords].
//! - **Placeholders**: `?`, so statements need no renumbering.
//!
//! [UPSERT]: https://www.sqlite.org/lang_upsert.html
//! [RETURNING]: https://www.sqlite.org/lang_returning.html
//! [SQLite keywords]: https://www.sqlite.org/lang_keywords.html
//!
//! ## Example
//!
//! ```rust
//! use sqlweave_core::{insert, SqlValue, Statement};
//! use sqlweave_sqlite::{InsertExt, SqliteDialect};
//!
//! let (sql, params) = insert("users")
//!     .columns(["id", "name", "email"])
//!     .values([
//!         SqlValue::Int(1),
//!         SqlValue::Text(String::from("Alice")),
//!         SqlValue::Text(String::from("alice@example.com")),
//!     ])
//!     .on_conflict(["id"])
//!     .do_update(["name", "email"])
//!     .build_with(&SqliteDialect)
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "INSERT INTO \"users\" (\"id\", \"name\", \"email\") VALUES (?, ?, ?) \
//!      ON CONFLICT (\"id\") DO UPDATE SET \"name\" = excluded.\"name\", \"email\" = excluded.\"email\""
//! );
//! assert_eq!(params.len(), 3);
//! ```

pub mod builder;
mod dialect;

pub use builder::{InsertExt, Upsert};
pub use dialect::SqliteDialect;
