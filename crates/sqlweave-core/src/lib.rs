//! # sqlweave-core
//!
//! Programmatic SQL statement assembly for several dialects.
//!
//! This crate provides:
//! - Fluent SELECT/INSERT/UPDATE/DELETE builders producing SQL text plus an
//!   ordered argument list
//! - Composable conditions with correct AND/OR parenthesization
//! - Per-dialect identifier quoting and placeholder renumbering
//!
//! ## Building a statement
//!
//! ```rust
//! use sqlweave_core::{cond, select, Statement};
//! use sqlweave_core::dialect::MySqlDialect;
//!
//! let (sql, params) = select(["id", "name"])
//!     .from("users")
//!     .where_clause(cond::eq("active", true))
//!     .build_with(&MySqlDialect)
//!     .unwrap();
//!
//! assert_eq!(sql, "SELECT `id`, `name` FROM `users` WHERE active = ?");
//! assert_eq!(params.len(), 1);
//! ```
//!
//! ## SQL injection prevention
//!
//! Values are always bound, never spliced into the SQL text:
//!
//! ```rust
//! use sqlweave_core::{cond, select, SqlValue, Statement};
//! use sqlweave_core::dialect::PostgresDialect;
//!
//! let user_input = "'; DROP TABLE users; --";
//! let (sql, params) = select(["id"])
//!     .from("users")
//!     .where_clause(cond::eq("name", user_input))
//!     .build_with(&PostgresDialect)
//!     .unwrap();
//!
//! assert_eq!(sql, "SELECT \"id\" FROM \"users\" WHERE name = $1");
//! assert_eq!(params, vec![SqlValue::Text(String::from(user_input))]);
//! ```
//!
//! Only [`Expr::raw`], [`cond::raw`] and `set_raw` write caller text
//! verbatim.
//!
//! ## Dialects
//!
//! A statement renders with the dialect given to `with_dialect`, or else
//! with the process-wide default (MySQL until [`set_default_dialect`] is
//! called). [`Statement::build_with`] bypasses both.

pub mod builder;
pub mod dialect;
pub mod error;

pub use builder::cond;
pub use builder::{
    col, delete, insert, select, update, Condition, Delete, Expr, Insert, Returning, Select,
    SqlValue, Statement, ToSqlValue, Update,
};
pub use dialect::{default_dialect, set_default_dialect, Dialect, DialectKind};
pub use error::{BuildError, ErrorKind, Result};
