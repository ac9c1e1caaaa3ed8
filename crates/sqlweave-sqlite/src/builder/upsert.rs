//! SQLite UPSERT (INSERT ... ON CONFLICT) builder.

use sqlweave_core::builder::{Insert, RenderContext, Returning, Statement};
use sqlweave_core::dialect::{Dialect, DialectRef};
use sqlweave_core::error::{BuildError, Result};

/// What to do when the conflict target matches an existing row.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Nothing,
    Update(Vec<String>),
}

/// An `INSERT ... ON CONFLICT (...) DO NOTHING | DO UPDATE SET ...` builder.
///
/// Wraps a core [`Insert`]; the insert renders unchanged and the conflict
/// clause follows it. Building requires a dialect with upsert support.
#[derive(Debug, Clone)]
pub struct Upsert {
    insert: Insert,
    target: Vec<String>,
    action: Action,
    error: Option<BuildError>,
}

impl Upsert {
    /// Wraps `insert`. The default action is `DO NOTHING`.
    #[must_use]
    pub const fn new(insert: Insert) -> Self {
        Self {
            insert,
            target: vec![],
            action: Action::Nothing,
            error: None,
        }
    }

    /// Sets the conflict target columns. An empty list is an error.
    #[must_use]
    pub fn on_conflict<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        if self.error.is_some() || self.insert.error().is_some() {
            return self;
        }
        self.target = columns.into_iter().map(Into::into).collect();
        if self.target.is_empty() {
            self.error = Some(BuildError::EmptyConflictTarget);
        }
        self
    }

    /// Sets the `DO NOTHING` action.
    #[must_use]
    pub fn do_nothing(mut self) -> Self {
        if self.error.is_none() {
            self.action = Action::Nothing;
        }
        self
    }

    /// Sets `DO UPDATE SET c = excluded.c` for each column.
    #[must_use]
    pub fn do_update<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        if self.error.is_some() || self.insert.error().is_some() {
            return self;
        }
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            self.error = Some(BuildError::MissingAssignments);
        } else {
            self.action = Action::Update(columns);
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
    pub fn with_dialect<D: Dialect + 'static>(self, dialect: D) -> Self {
        Self {
            insert: self.insert.with_dialect(dialect),
            ..self
        }
    }
}

impl Statement for Upsert {
    fn dialect_override(&self) -> Option<&DialectRef> {
        self.insert.dialect_override()
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        // errors of the wrapped insert come first
        self.insert.render(ctx)?;
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.target.is_empty() {
            return Err(BuildError::EmptyConflictTarget);
        }

        let dialect = ctx.dialect();
        if !dialect.supports_upsert() {
            return Err(BuildError::Unsupported {
                dialect: dialect.name(),
                feature: "ON CONFLICT",
            });
        }

        ctx.push_sql(" ON CONFLICT (");
        ctx.push_ident_list(&self.target);
        ctx.push_sql(")");

        match &self.action {
            Action::Nothing => ctx.push_sql(" DO NOTHING"),
            Action::Update(columns) => {
                ctx.push_sql(" DO UPDATE SET ");
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        ctx.push_sql(", ");
                    }
                    let quoted = dialect.quote_identifier(column);
                    ctx.push_sql(&format!("{quoted} = excluded.{quoted}"));
                }
            }
        }
        Ok(())
    }
}

/// Adds [`on_conflict`](InsertExt::on_conflict) to the core [`Insert`].
pub trait InsertExt {
    /// Turns the insert into an upsert with the given conflict target.
    #[must_use]
    fn on_conflict<I, C>(self, columns: I) -> Upsert
    where
        I: IntoIterator<Item = C>,
        C: Into<String>;
}

impl InsertExt for Insert {
    fn on_conflict<I, C>(self, columns: I) -> Upsert
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Upsert::new(self).on_conflict(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqliteDialect;
    use sqlweave_core::builder::{SqlValue, ToSqlValue};
    use sqlweave_core::dialect::{MySqlDialect, PostgresDialect};
    use sqlweave_core::insert;

    fn user_row(id: i64, name: &str) -> [SqlValue; 2] {
        [id.to_sql_value(), name.to_sql_value()]
    }

    #[test]
    fn test_upsert_do_nothing() {
        let (sql, params) = insert("users")
            .columns(["id", "name"])
            .values(user_row(1, "Alice"))
            .on_conflict(["id"])
            .do_nothing()
            .build_with(&SqliteDialect)
            .unwrap();

        assert_eq!(
            sql,
            "INSERT INTO \"users\" (\"id\", \"name\") VALUES (?, ?) ON CONFLICT (\"id\") DO NOTHING"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_upsert_do_update() {
        let (sql, params) = Upsert::new(
            insert("users")
                .columns(["id", "name", "email"])
                .values([
                    1_i64.to_sql_value(),
                    "Alice".to_sql_value(),
                    "alice@example.com".to_sql_value(),
                ]),
        )
        .on_conflict(["id"])
        .do_update(["name", "email"])
        .build_with(&SqliteDialect)
        .unwrap();

        assert_eq!(
            sql,
            "INSERT INTO \"users\" (\"id\", \"name\", \"email\") VALUES (?, ?, ?) \
             ON CONFLICT (\"id\") DO UPDATE SET \"name\" = excluded.\"name\", \"email\" = excluded.\"email\""
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_upsert_composite_key_multiple_rows() {
        let (sql, params) = insert("user_roles")
            .columns(["user_id", "role_id", "granted_at"])
            .values([
                1_i64.to_sql_value(),
                2_i64.to_sql_value(),
                "2024-01-01".to_sql_value(),
            ])
            .values([
                1_i64.to_sql_value(),
                3_i64.to_sql_value(),
                "2024-02-01".to_sql_value(),
            ])
            .on_conflict(["user_id", "role_id"])
            .do_update(["granted_at"])
            .build_with(&SqliteDialect)
            .unwrap();

        assert!(sql.contains("VALUES (?, ?, ?), (?, ?, ?)"));
        assert!(sql.ends_with(
            "ON CONFLICT (\"user_id\", \"role_id\") DO UPDATE SET \"granted_at\" = excluded.\"granted_at\""
        ));
        assert_eq!(params.len(), 6);
    }

    #[test]
    fn test_upsert_renumbers_with_postgres() {
        let (sql, _) = insert("users")
            .columns(["id", "name"])
            .values(user_row(1, "Alice"))
            .on_conflict(["id"])
            .do_update(["name"])
            .build_with(&PostgresDialect)
            .unwrap();
        assert!(sql.starts_with("INSERT INTO \"users\" (\"id\", \"name\") VALUES ($1, $2)"));
    }

    #[test]
    fn test_upsert_returning() {
        let (sql, _) = insert("users")
            .columns(["id", "name"])
            .values(user_row(1, "Alice"))
            .on_conflict(["id"])
            .do_nothing()
            .returning(["id"])
            .build_with(&SqliteDialect)
            .unwrap();
        assert!(sql.ends_with("DO NOTHING RETURNING \"id\""));
    }

    #[test]
    fn test_upsert_requires_support() {
        let err = insert("users")
            .columns(["id"])
            .values([1])
            .on_conflict(["id"])
            .build_with(&MySqlDialect)
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::Unsupported {
                dialect: "mysql",
                feature: "ON CONFLICT",
            }
        );
    }

    #[test]
    fn test_upsert_requires_target() {
        let upsert = insert("users")
            .columns(["id"])
            .values([1])
            .on_conflict(Vec::<String>::new())
            .do_update(["id"]);
        let err = upsert.build_with(&SqliteDialect).unwrap_err();
        assert_eq!(err, BuildError::EmptyConflictTarget);

        let err = Upsert::new(insert("users").columns(["id"]).values([1]))
            .build_with(&SqliteDialect)
            .unwrap_err();
        assert_eq!(err, BuildError::EmptyConflictTarget);
    }

    #[test]
    fn test_insert_errors_come_first() {
        let err = insert("users")
            .columns(["id", "name"])
            .values([1])
            .on_conflict(["id"])
            .build_with(&SqliteDialect)
            .unwrap_err();
        assert!(matches!(err, BuildError::RowLength { row: 0, .. }));
    }

    #[test]
    fn test_insert_recorded_error_beats_conflict_target() {
        let upsert = insert("")
            .columns(["a"])
            .values([1])
            .on_conflict(Vec::<String>::new());
        let err = upsert.build_with(&SqliteDialect).unwrap_err();
        assert_eq!(err, BuildError::EmptyTable);

        let err = insert("  ")
            .columns(["a"])
            .values([1])
            .on_conflict(["a"])
            .do_update(Vec::<String>::new())
            .build_with(&SqliteDialect)
            .unwrap_err();
        assert_eq!(err, BuildError::EmptyTable);
    }

    #[test]
    fn test_upsert_sql_injection_prevention() {
        let malicious = "'; DROP TABLE users; --";
        let (sql, params) = insert("users")
            .columns(["id", "name"])
            .values(user_row(1, malicious))
            .on_conflict(["id"])
            .do_update(["name"])
            .with_dialect(SqliteDialect)
            .build()
            .unwrap();

        assert!(sql.contains("VALUES (?, ?)"));
        assert!(matches!(&params[1], SqlValue::Text(s) if s == malicious));
    }
}
