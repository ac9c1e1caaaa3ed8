//! INSERT statement builder.

use std::sync::Arc;

use super::clause::TableClause;
use super::expr::Expr;
use super::render::RenderContext;
use super::returning::Returning;
use super::statement::Statement;
use super::value::{SqlValue, ToSqlValue};
use crate::dialect::{Dialect, DialectRef};
use crate::error::{BuildError, Result};

/// Starts an INSERT into `table`.
#[must_use]
pub fn insert(table: impl Into<Expr>) -> Insert {
    Insert::into_table(table)
}

/// An INSERT statement builder.
///
/// Column count and row lengths are checked when the statement is built.
#[derive(Debug, Clone)]
pub struct Insert {
    table: Option<TableClause>,
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue>>,
    error: Option<BuildError>,
    dialect: Option<DialectRef>,
}

impl Insert {
    /// Creates an INSERT builder for `table`.
    #[must_use]
    pub fn into_table(table: impl Into<Expr>) -> Self {
        let (table, error) = match TableClause::for_mutation(table.into(), "INSERT") {
            Ok(table) => (Some(table), None),
            Err(err) => (None, Some(err)),
        };
        Self {
            table,
            columns: vec![],
            rows: vec![],
            error,
            dialect: None,
        }
    }

    /// Returns the first recorded error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    /// Sets the column list.
    #[must_use]
    pub fn columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        if self.error.is_none() {
            self.columns = columns.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Appends one row of values.
    ///
    /// Rows mixing types can be passed as [`SqlValue`]s.
    #[must_use]
    pub fn values<I, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToSqlValue,
    {
        if self.error.is_none() {
            self.rows
                .push(row.into_iter().map(ToSqlValue::to_sql_value).collect());
        }
        self
    }

    /// Appends several rows.
    #[must_use]
    pub fn values_many<R, I, V>(self, rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: ToSqlValue,
    {
        rows.into_iter().fold(self, Self::values)
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

    fn validate(&self) -> Result<&TableClause> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let table = self.table.as_ref().ok_or(BuildError::EmptyTable)?;
        if self.columns.is_empty() {
            return Err(BuildError::MissingColumns);
        }
        if self.rows.is_empty() {
            return Err(BuildError::MissingValues);
        }
        let expected = self.columns.len();
        if let Some((row, values)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != expected)
        {
            return Err(BuildError::RowLength {
                row,
                expected,
                actual: values.len(),
            });
        }
        Ok(table)
    }
}

impl Statement for Insert {
    fn dialect_override(&self) -> Option<&DialectRef> {
        self.dialect.as_ref()
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        let table = self.validate()?;

        ctx.push_sql("INSERT INTO ");
        table.render(ctx)?;
        ctx.push_sql(" (");
        ctx.push_ident_list(&self.columns);
        ctx.push_sql(") VALUES ");

        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                ctx.push_sql(", ");
            }
            ctx.push_sql("(");
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    ctx.push_sql(", ");
                }
                ctx.push_param(value.clone());
            }
            ctx.push_sql(")");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::select::Select;
    use crate::dialect::{GenericDialect, MySqlDialect, PostgresDialect};

    #[test]
    fn test_simple_insert() {
        let (sql, params) = insert("users")
            .columns(["name", "email"])
            .values(["Alice", "alice@example.com"])
            .build_with(&MySqlDialect)
            .unwrap();

        assert_eq!(sql, "INSERT INTO `users` (`name`, `email`) VALUES (?, ?)");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_insert_multiple_rows_renumbered() {
        let (sql, params) = Insert::into_table("users")
            .columns(["id", "name"])
            .values([SqlValue::Int(1), SqlValue::Text(String::from("Alice"))])
            .values([2_i64.to_sql_value(), "Bob".to_sql_value()])
            .build_with(&PostgresDialect)
            .unwrap();

        assert_eq!(
            sql,
            "INSERT INTO \"users\" (\"id\", \"name\") VALUES ($1, $2), ($3, $4)"
        );
        assert_eq!(
            params,
            vec![
                SqlValue::Int(1),
                SqlValue::Text(String::from("Alice")),
                SqlValue::Int(2),
                SqlValue::Text(String::from("Bob")),
            ]
        );
    }

    #[test]
    fn test_insert_values_many() {
        let (sql, params) = insert("tags")
            .columns(["label"])
            .values_many([["red"], ["green"], ["blue"]])
            .build_with(&GenericDialect)
            .unwrap();

        assert_eq!(sql, "INSERT INTO tags (label) VALUES (?), (?), (?)");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_insert_null_is_bound() {
        let (sql, params) = insert("users")
            .columns(["name", "deleted_at"])
            .values([Some("Alice"), None])
            .build_with(&MySqlDialect)
            .unwrap();
        assert_eq!(sql, "INSERT INTO `users` (`name`, `deleted_at`) VALUES (?, ?)");
        assert_eq!(params[1], SqlValue::Null);
    }

    #[test]
    fn test_insert_requires_columns_and_rows() {
        let err = insert("users").values([1]).build_with(&MySqlDialect).unwrap_err();
        assert_eq!(err, BuildError::MissingColumns);

        let err = insert("users")
            .columns(["id"])
            .build_with(&MySqlDialect)
            .unwrap_err();
        assert_eq!(err, BuildError::MissingValues);
    }

    #[test]
    fn test_insert_row_length_mismatch() {
        let err = insert("users")
            .columns(["id", "name"])
            .values([SqlValue::Int(1), SqlValue::Text(String::from("Alice"))])
            .values([SqlValue::Int(2)])
            .build_with(&MySqlDialect)
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::RowLength {
                row: 1,
                expected: 2,
                actual: 1,
            }
        );
        assert_eq!(
            err.to_string(),
            "INSERT row 1 has 1 values but 2 columns were given"
        );
    }

    #[test]
    fn test_insert_rejects_blank_and_subquery_tables() {
        assert_eq!(insert("").error(), Some(&BuildError::EmptyTable));
        let err = insert(Expr::subquery(Select::new()))
            .columns(["id"])
            .values([1])
            .build_with(&MySqlDialect)
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::UnsupportedExpression {
                clause: "INSERT",
                kind: "subquery",
            }
        );
    }
}
