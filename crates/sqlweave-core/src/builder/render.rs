//! Rendering state shared by every clause of one build.
//!
//! Conditions are assembled with `?` as a dialect-neutral placeholder marker.
//! [`RenderContext::push_fragment`] is the only place where markers are turned
//! into dialect placeholders, using one counter for the whole statement,
//! nested subqueries included. Because fragments are pushed in emission
//! order, the numbering always matches the order of the argument list.

use super::select::Select;
use super::statement::Statement;
use super::value::SqlValue;
use crate::dialect::Dialect;
use crate::error::{BuildError, Result};

/// Output buffer, argument list and placeholder counter for one build.
#[derive(Debug)]
pub struct RenderContext<'d> {
    dialect: &'d dyn Dialect,
    sql: String,
    params: Vec<SqlValue>,
    next_placeholder: usize,
}

impl<'d> RenderContext<'d> {
    /// Creates an empty context for `dialect`.
    #[must_use]
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            params: vec![],
            next_placeholder: 1,
        }
    }

    /// Returns the dialect this build renders for.
    #[must_use]
    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    /// Appends SQL text verbatim. `?` characters are not touched.
    pub fn push_sql(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Appends a possibly qualified identifier, quoting each segment.
    pub fn push_ident(&mut self, name: &str) {
        let quoted = quote_qualified(self.dialect, name);
        self.sql.push_str(&quoted);
    }

    /// Appends a comma-separated list of quoted identifiers.
    pub fn push_ident_list<S: AsRef<str>>(&mut self, names: &[S]) {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.push_ident(name.as_ref());
        }
    }

    /// Appends a fragment that uses `?` markers, together with its values.
    ///
    /// When the dialect's placeholders are not `?`, every marker is replaced
    /// by the next numbered placeholder.
    pub fn push_fragment(&mut self, sql: &str, params: &[SqlValue]) {
        if self.dialect.uses_question_marks() {
            self.sql.push_str(sql);
        } else {
            for ch in sql.chars() {
                if ch == '?' {
                    let placeholder = self.dialect.placeholder(self.next_placeholder);
                    self.next_placeholder += 1;
                    self.sql.push_str(&placeholder);
                } else {
                    self.sql.push(ch);
                }
            }
        }
        self.params.extend_from_slice(params);
    }

    /// Appends one placeholder bound to `value`.
    pub fn push_param(&mut self, value: SqlValue) {
        self.push_fragment("?", &[]);
        self.params.push(value);
    }

    /// Appends a parenthesized nested SELECT sharing this context.
    ///
    /// The nested statement always renders with this context's dialect.
    pub fn push_subquery(&mut self, select: &Select) -> Result<()> {
        self.sql.push('(');
        select
            .render(self)
            .map_err(|err| BuildError::Subquery(Box::new(err)))?;
        self.sql.push(')');
        Ok(())
    }

    /// Number of values bound so far.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Consumes the context, returning the SQL text and its arguments.
    #[must_use]
    pub fn finish(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.params)
    }
}

/// Quotes `name` segment by segment (`a.b` -> `"a"."b"`). A `*` segment is
/// left bare so `t.*` stays valid.
#[must_use]
pub fn quote_qualified(dialect: &dyn Dialect, name: &str) -> String {
    name.split('.')
        .map(|segment| {
            if segment == "*" {
                String::from(segment)
            } else {
                dialect.quote_identifier(segment)
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{GenericDialect, MySqlDialect, PostgresDialect};

    #[test]
    fn test_quote_qualified() {
        let d = MySqlDialect::new();
        assert_eq!(quote_qualified(&d, "users"), "`users`");
        assert_eq!(quote_qualified(&d, "u.id"), "`u`.`id`");
        assert_eq!(quote_qualified(&d, "public.users.id"), "`public`.`users`.`id`");
        assert_eq!(quote_qualified(&d, "u.*"), "`u`.*");
        assert_eq!(quote_qualified(&GenericDialect, "u.id"), "u.id");
    }

    #[test]
    fn test_push_fragment_renumbers_across_calls() {
        let d = PostgresDialect::new();
        let mut ctx = RenderContext::new(&d);
        ctx.push_fragment("a = ? AND b IN (?, ?)", &[
            SqlValue::Int(1),
            SqlValue::Int(2),
            SqlValue::Int(3),
        ]);
        ctx.push_sql(" | ");
        ctx.push_param(SqlValue::Bool(true));
        let (sql, params) = ctx.finish();
        assert_eq!(sql, "a = $1 AND b IN ($2, $3) | $4");
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_push_fragment_keeps_question_marks() {
        let d = MySqlDialect::new();
        let mut ctx = RenderContext::new(&d);
        ctx.push_fragment("a = ? OR b = ?", &[SqlValue::Int(1), SqlValue::Int(2)]);
        assert_eq!(ctx.param_count(), 2);
        let (sql, _) = ctx.finish();
        assert_eq!(sql, "a = ? OR b = ?");
    }

    #[test]
    fn test_push_sql_is_verbatim() {
        let d = PostgresDialect::new();
        let mut ctx = RenderContext::new(&d);
        ctx.push_sql("data ? 'key'");
        let (sql, params) = ctx.finish();
        assert_eq!(sql, "data ? 'key'");
        assert!(params.is_empty());
    }
}
