//! UPDATE statement builder.

use std::sync::Arc;

use super::clause::{TableClause, WhereClause};
use super::cond::Condition;
use super::expr::Expr;
use super::render::RenderContext;
use super::returning::Returning;
use super::statement::Statement;
use super::value::{SqlValue, ToSqlValue};
use crate::dialect::{Dialect, DialectRef};
use crate::error::{BuildError, Result};

/// Starts an UPDATE of `table`.
#[must_use]
pub fn update(table: impl Into<Expr>) -> Update {
    Update::table(table)
}

/// Right-hand side of a SET assignment.
#[derive(Debug, Clone)]
enum Assigned {
    Value(SqlValue),
    Raw(String),
}

#[derive(Debug, Clone)]
struct Assignment {
    column: String,
    value: Assigned,
}

/// An UPDATE statement builder.
///
/// SET placeholders are numbered before WHERE placeholders.
#[derive(Debug, Clone)]
pub struct Update {
    table: Option<TableClause>,
    assignments: Vec<Assignment>,
    where_clause: WhereClause,
    error: Option<BuildError>,
    dialect: Option<DialectRef>,
}

impl Update {
    /// Creates an UPDATE builder for `table`.
    #[must_use]
    pub fn table(table: impl Into<Expr>) -> Self {
        let (table, error) = match TableClause::for_mutation(table.into(), "UPDATE") {
            Ok(table) => (Some(table), None),
            Err(err) => (None, Some(err)),
        };
        Self {
            table,
            assignments: vec![],
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

    /// Adds `column = ?` bound to `value`.
    #[must_use]
    pub fn set<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        if self.error.is_none() {
            self.assignments.push(Assignment {
                column: String::from(column),
                value: Assigned::Value(value.to_sql_value()),
            });
        }
        self
    }

    /// Adds `column = <sql>` with `sql` written verbatim, e.g. `count + 1`.
    ///
    /// **Warning**: only use this for SQL fragments that don't contain user
    /// input.
    #[must_use]
    pub fn set_raw(mut self, column: &str, sql: &str) -> Self {
        if self.error.is_none() {
            self.assignments.push(Assignment {
                column: String::from(column),
                value: Assigned::Raw(String::from(sql)),
            });
        }
        self
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

impl Statement for Update {
    fn dialect_override(&self) -> Option<&DialectRef> {
        self.dialect.as_ref()
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let table = self.table.as_ref().ok_or(BuildError::EmptyTable)?;
        if self.assignments.is_empty() {
            return Err(BuildError::MissingAssignments);
        }

        ctx.push_sql("UPDATE ");
        table.render(ctx)?;
        ctx.push_sql(" SET ");
        for (i, assignment) in self.assignments.iter().enumerate() {
            if i > 0 {
                ctx.push_sql(", ");
            }
            ctx.push_ident(&assignment.column);
            ctx.push_sql(" = ");
            match &assignment.value {
                Assigned::Value(value) => ctx.push_param(value.clone()),
                Assigned::Raw(sql) => ctx.push_sql(sql),
            }
        }

        self.where_clause.render("WHERE", ctx)
    }
}
