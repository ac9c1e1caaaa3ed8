//! Configuration-friendly dialect selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Dialect, GenericDialect, MySqlDialect, PostgresDialect};

/// Selects one of the built-in dialects by name.
///
/// Deserializes from lowercase names so it can sit in an application's
/// configuration file, and is itself a [`Dialect`]:
///
/// ```rust
/// use sqlweave_core::dialect::{Dialect, DialectKind};
///
/// let kind: DialectKind = "postgresql".parse().unwrap();
/// assert_eq!(kind, DialectKind::Postgres);
/// assert_eq!(kind.placeholder(2), "$2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// [`GenericDialect`].
    Generic,
    /// [`MySqlDialect`].
    #[default]
    MySql,
    /// [`PostgresDialect`].
    Postgres,
}

impl DialectKind {
    fn as_dialect(self) -> &'static dyn Dialect {
        match self {
            Self::Generic => &GenericDialect,
            Self::MySql => &MySqlDialect,
            Self::Postgres => &PostgresDialect,
        }
    }
}

impl Dialect for DialectKind {
    fn name(&self) -> &'static str {
        self.as_dialect().name()
    }

    fn placeholder(&self, index: usize) -> String {
        self.as_dialect().placeholder(index)
    }

    fn identifier_quote(&self) -> Option<char> {
        self.as_dialect().identifier_quote()
    }

    fn supports_returning(&self) -> bool {
        self.as_dialect().supports_returning()
    }

    fn supports_upsert(&self) -> bool {
        self.as_dialect().supports_upsert()
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a dialect name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown SQL dialect `{0}`")]
pub struct ParseDialectError(pub String);

impl FromStr for DialectKind {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" | "ansi" => Ok(Self::Generic),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ParseDialectError(String::from(s))),
        }
    }
}
