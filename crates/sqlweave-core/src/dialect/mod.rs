//! SQL Dialect support.
//!
//! Different databases quote identifiers and spell placeholders differently.
//! This module provides a trait for that behavior, the built-in dialects and
//! the process-wide default used by statements without an explicit dialect.
//!
//! # Default dialect
//!
//! The default is guarded by a single mutex. Set it once at startup; a
//! statement reads it when `build()` starts, so switching it while other
//! threads are building lets those builds observe either value. Statements
//! that must not depend on that timing should call `with_dialect`.

mod generic;
mod kind;
mod mysql;
mod postgres;

use std::fmt;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use tracing::info;

pub use generic::GenericDialect;
pub use kind::{DialectKind, ParseDialectError};
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;

/// Shared handle to a dialect.
pub type DialectRef = Arc<dyn Dialect>;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the placeholder for the `index`-th bound value (1-based).
    fn placeholder(&self, index: usize) -> String {
        let _ = index;
        String::from("?")
    }

    /// Returns the identifier quote character, if identifiers are quoted.
    fn identifier_quote(&self) -> Option<char> {
        Some('"')
    }

    /// Quotes an identifier, doubling any embedded quote character.
    fn quote_identifier(&self, name: &str) -> String {
        match self.identifier_quote() {
            Some(quote) => {
                let escaped = name.replace(quote, &format!("{quote}{quote}"));
                format!("{quote}{escaped}{quote}")
            }
            None => String::from(name),
        }
    }

    /// Quotes a string literal using single quotes.
    fn quote_string(&self, value: &str) -> String {
        let escaped = value.replace('\'', "''");
        format!("'{escaped}'")
    }

    /// Returns whether the dialect supports RETURNING clause.
    fn supports_returning(&self) -> bool {
        false
    }

    /// Returns whether the dialect supports UPSERT (ON CONFLICT).
    fn supports_upsert(&self) -> bool {
        false
    }

    /// Returns true when placeholders are the bare `?` marker, in which case
    /// no renumbering is needed.
    fn uses_question_marks(&self) -> bool {
        self.placeholder(1) == "?"
    }
}

static DEFAULT_DIALECT: LazyLock<Mutex<DialectRef>> =
    LazyLock::new(|| Mutex::new(Arc::new(MySqlDialect::new())));

/// Replaces the process-wide default dialect.
///
/// Only statements without a `with_dialect` override are affected, and only
/// for builds that start after this call returns.
pub fn set_default_dialect<D: Dialect + 'static>(dialect: D) {
    let next: DialectRef = Arc::new(dialect);
    let mut guard = DEFAULT_DIALECT
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    info!(
        previous = guard.name(),
        current = next.name(),
        "default dialect changed"
    );
    *guard = next;
}

/// Returns the process-wide default dialect.
#[must_use]
pub fn default_dialect() -> DialectRef {
    DEFAULT_DIALECT
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier_escapes_quote_char() {
        assert_eq!(
            PostgresDialect::new().quote_identifier("we\"ird"),
            "\"we\"\"ird\""
        );
        assert_eq!(MySqlDialect::new().quote_identifier("a`b"), "`a``b`");
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(GenericDialect::new().quote_string("O'Brien"), "'O''Brien'");
    }

    #[test]
    fn test_uses_question_marks() {
        assert!(GenericDialect::new().uses_question_marks());
        assert!(MySqlDialect::new().uses_question_marks());
        assert!(!PostgresDialect::new().uses_question_marks());
    }
}
