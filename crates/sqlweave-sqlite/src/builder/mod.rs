//! SQLite-specific statement builders.

mod upsert;

pub use upsert::{InsertExt, Upsert};
