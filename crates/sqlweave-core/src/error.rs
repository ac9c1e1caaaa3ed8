//! Error types for statement building.

use thiserror::Error;

/// Broad classification of a [`BuildError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required piece of the statement is missing or inconsistent.
    Configuration,
    /// An expression of the wrong shape was used in a clause.
    Type,
    /// A nested statement failed to build.
    Composition,
}

/// Errors recorded while configuring or building a statement.
///
/// Builders keep the first error they see and ignore every later call, so
/// the error returned by `build()` is always the earliest mistake.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// Table name was empty.
    #[error("table name must not be empty")]
    EmptyTable,

    /// An operator other than `=`/`!=` received NULL, including a NULL
    /// BETWEEN bound or IN element.
    #[error("operator `{operator}` on `{column}` requires a non-null value")]
    NullValue {
        /// The offending column.
        column: String,
        /// The operator that cannot take NULL.
        operator: &'static str,
    },

    /// IN / NOT IN was given an empty list.
    #[error("`{operator}` on `{column}` requires at least one value")]
    EmptyList {
        /// The offending column.
        column: String,
        /// `IN` or `NOT IN`.
        operator: &'static str,
    },

    /// CASE without any WHEN branch.
    #[error("CASE requires at least one WHEN branch")]
    EmptyCase,

    /// A raw fragment's `?` markers don't match its bound values.
    #[error("raw fragment `{sql}` has {placeholders} placeholders but {params} values")]
    PlaceholderCount {
        /// The raw fragment.
        sql: String,
        /// Number of `?` markers found.
        placeholders: usize,
        /// Number of values supplied.
        params: usize,
    },

    /// INSERT without a column list.
    #[error("INSERT requires at least one column")]
    MissingColumns,

    /// INSERT without any value row.
    #[error("INSERT requires at least one row of values")]
    MissingValues,

    /// UPDATE without SET assignments.
    #[error("UPDATE requires at least one assignment")]
    MissingAssignments,

    /// An INSERT row whose length differs from the column list.
    #[error("INSERT row {row} has {actual} values but {expected} columns were given")]
    RowLength {
        /// Zero-based row index.
        row: usize,
        /// Number of columns.
        expected: usize,
        /// Number of values in the row.
        actual: usize,
    },

    /// ON CONFLICT without a conflict target.
    #[error("ON CONFLICT requires at least one target column")]
    EmptyConflictTarget,

    /// An expression variant that the clause cannot render.
    #[error("{clause} does not accept {kind} expressions")]
    UnsupportedExpression {
        /// Clause that rejected the expression.
        clause: &'static str,
        /// Variant name of the rejected expression.
        kind: &'static str,
    },

    /// A nested statement failed to build.
    #[error("nested statement failed: {0}")]
    Subquery(#[source] Box<BuildError>),

    /// The dialect cannot express a feature.
    #[error("dialect `{dialect}` does not support {feature}")]
    Unsupported {
        /// Dialect name.
        dialect: &'static str,
        /// Feature that was requested.
        feature: &'static str,
    },
}

impl BuildError {
    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedExpression { .. } => ErrorKind::Type,
            Self::Subquery(_) => ErrorKind::Composition,
            _ => ErrorKind::Configuration,
        }
    }
}

/// Result type for statement building.
pub type Result<T> = std::result::Result<T, BuildError>;
