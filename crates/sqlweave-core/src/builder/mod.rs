//! Statement builders.
//!
//! Builders record the first invalid call and surface it from `build()`;
//! nothing is validated against a database or a schema.
//!
//! # Example
//!
//! ```rust
//! use sqlweave_core::builder::{cond, select, Statement};
//! use sqlweave_core::dialect::PostgresDialect;
//!
//! let (sql, params) = select(["id", "name"])
//!     .from("users")
//!     .where_clause(cond::eq("active", true).and(cond::gt("age", 18)))
//!     .build_with(&PostgresDialect)
//!     .unwrap();
//!
//! assert_eq!(sql, "SELECT \"id\", \"name\" FROM \"users\" WHERE active = $1 AND age > $2");
//! assert_eq!(params.len(), 2);
//! ```

mod clause;
mod compose;
pub mod cond;
mod debug;
mod delete;
mod expr;
mod insert;
mod render;
mod returning;
mod select;
mod statement;
mod update;
pub mod value;

pub use cond::{Case, Condition, Op};
pub use debug::interpolate;
pub use delete::{delete, Delete};
pub use expr::{col, Expr};
pub use insert::{insert, Insert};
pub use render::{quote_qualified, RenderContext};
pub use returning::Returning;
pub use select::{select, JoinKind, Order, Select};
pub use statement::Statement;
pub use update::{update, Update};
pub use value::{SqlValue, ToSqlValue};
