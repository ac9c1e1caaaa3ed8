//! DELETE statement builder.

use std::sync::Arc;

use super::clause::{TableClause, WhereClause};
use super::cond::Condition;
use super::expr::Expr;
use super::render::RenderContext;
use super::returning::Returning;
use super::statement::Statement;
use crate::dialect::{Dialect, DialectRef};
use crate::error::{BuildError, Result};

/// Starts a DELETE from `table`.
#[must_use]
pub fn delete(table: impl Into<Expr>) -> Delete {
    Delete::from_table(table)
}

/// A DELETE statement builder.
///
/// A DELETE without WHERE removes every row; nothing prevents it.
#[derive(Debug, Clone)]
pub struct Delete {
    table: Option<TableClause>,
    where_clause: WhereClause,
    error: Option<BuildError>,
    dialect: Option<DialectRef>,
}

impl Delete {
    /// Creates a DELETE builder for `table`.
    #[must_use]
    pub fn from_table(table: impl Into<Expr>) -> Self {
        let (table, error) = match TableClause::for_mutation(table.into(), "DELETE") {
            Ok(table) => (Some(table), None),
            Err(err) => (None, Some(err)),
        };
        Self {
            table,
            where_clause: WhereClause::default(),
            error,
            dialect: None,
        }
    }

    /// Returns the first recorded error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    /// Adds a WHERE condition. Repeated calls are AND-joined.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<Condition>) -> Self {
        if self.error.is_none() {
            if let Err(err) = self.where_clause.push(condition.into()) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Adds a `RETURNING` clause.
    #[must_use]
    pub fn returning<I, C>(self, columns: I) -> Returning<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Returning::new(self, columns)
    }

    /// Builds this statement with `dialect` instead of the process-wide
    /// default.
    #[must_use]
    pub fn with_dialect<D: Dialect + 'static>(mut self, dialect: D) -> Self {
        self.dialect = Some(Arc::new(dialect));
        self
    }
}

impl Statement for Delete {
    fn dialect_override(&self) -> Option<&DialectRef> {
        self.dialect.as_ref()
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let table = self.table.as_ref().ok_or(BuildError::EmptyTable)?;
        ctx.push_sql("DELETE FROM ");
        table.render(ctx)?;
        self.where_clause.render("WHERE", ctx)
    }
}
