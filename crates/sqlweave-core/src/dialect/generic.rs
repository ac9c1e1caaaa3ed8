//! Generic SQL dialect.

use super::Dialect;

/// A baseline dialect: identifiers are emitted as written and every
/// placeholder is `?`.
///
/// Useful for debugging output and for engines that accept unquoted ANSI SQL.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn identifier_quote(&self) -> Option<char> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
        assert_eq!(dialect.identifier_quote(), None);
        assert_eq!(dialect.quote_identifier("users"), "users");
        assert_eq!(dialect.placeholder(1), "?");
        assert_eq!(dialect.placeholder(7), "?");
        assert!(!dialect.supports_returning());
        assert!(!dialect.supports_upsert());
    }
}
