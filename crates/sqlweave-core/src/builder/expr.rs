//! Expressions usable in SELECT lists, FROM, JOIN, GROUP BY and ORDER BY.

use super::render::RenderContext;
use super::select::Select;
use crate::error::Result;

/// Creates a column (identifier) reference.
///
/// Dotted names are quoted segment by segment: `col("u.id")` renders
/// `` `u`.`id` `` with the MySQL dialect.
#[must_use]
pub fn col(name: &str) -> Expr {
    Expr::Ident(String::from(name))
}

/// A renderable SQL expression.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Table or column name, optionally dotted. Quoted per dialect.
    Ident(String),
    /// SQL inserted verbatim, never quoted or escaped.
    ///
    /// **Warning**: only use this for SQL fragments that don't contain user
    /// input.
    Raw(String),
    /// A pre-rendered function call such as `COUNT(*)`. Rendered verbatim.
    Func(String),
    /// A nested SELECT, rendered in parentheses. Its arguments are spliced
    /// into the parent's argument list at the point it appears.
    Subquery(Box<Select>),
    /// `<expr> AS <alias>`. The alias is written as given, never quoted.
    Aliased(Box<Expr>, String),
}

impl Expr {
    /// Creates an identifier expression.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    /// Creates a raw SQL expression.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }

    /// Creates a function-call expression, e.g. `Expr::func("COUNT(*)")`.
    #[must_use]
    pub fn func(call: impl Into<String>) -> Self {
        Self::Func(call.into())
    }

    /// Wraps a SELECT as a subquery expression.
    #[must_use]
    pub fn subquery(select: Select) -> Self {
        Self::Subquery(Box::new(select))
    }

    /// Adds an `AS <alias>` suffix.
    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> Self {
        Self::Aliased(Box::new(self), alias.into())
    }

    /// Name of the variant, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Ident(_) => "identifier",
            Self::Raw(_) => "raw",
            Self::Func(_) => "function",
            Self::Subquery(_) => "subquery",
            Self::Aliased(..) => "aliased",
        }
    }

    /// True for an empty identifier or empty raw text.
    pub(crate) fn is_blank(&self) -> bool {
        match self {
            Self::Ident(s) | Self::Raw(s) | Self::Func(s) => s.trim().is_empty(),
            Self::Subquery(_) => false,
            Self::Aliased(inner, _) => inner.is_blank(),
        }
    }

    /// Writes the expression into `ctx`.
    ///
    /// # Errors
    ///
    /// Fails when a nested subquery fails to build.
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        match self {
            Self::Ident(name) => ctx.push_ident(name),
            Self::Raw(sql) | Self::Func(sql) => ctx.push_sql(sql),
            Self::Subquery(select) => ctx.push_subquery(select)?,
            Self::Aliased(inner, alias) => {
                inner.render(ctx)?;
                ctx.push_sql(" AS ");
                ctx.push_sql(alias);
            }
        }
        Ok(())
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Self::Ident(String::from(name))
    }
}

impl From<String> for Expr {
    fn from(name: String) -> Self {
        Self::Ident(name)
    }
}

impl From<&String> for Expr {
    fn from(name: &String) -> Self {
        Self::Ident(name.clone())
    }
}

impl From<Select> for Expr {
    fn from(select: Select) -> Self {
        Self::subquery(select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::cond;
    use crate::dialect::{Dialect, MySqlDialect, PostgresDialect};

    fn render(expr: &Expr, dialect: &dyn Dialect) -> (String, usize) {
        let mut ctx = RenderContext::new(dialect);
        expr.render(&mut ctx).unwrap();
        let (sql, params) = ctx.finish();
        (sql, params.len())
    }

    #[test]
    fn test_ident_quoting() {
        assert_eq!(render(&col("name"), &MySqlDialect).0, "`name`");
        assert_eq!(render(&col("u.name"), &PostgresDialect).0, "\"u\".\"name\"");
    }

    #[test]
    fn test_raw_and_func_verbatim() {
        assert_eq!(render(&Expr::raw("1 + 1"), &MySqlDialect).0, "1 + 1");
        assert_eq!(render(&Expr::func("COUNT(*)"), &MySqlDialect).0, "COUNT(*)");
    }

    #[test]
    fn test_alias_not_quoted() {
        let expr = Expr::func("COUNT(o.id)").alias("order_count");
        assert_eq!(render(&expr, &MySqlDialect).0, "COUNT(o.id) AS order_count");

        let expr = col("u.name").alias("userName");
        assert_eq!(render(&expr, &PostgresDialect).0, "\"u\".\"name\" AS userName");
    }

    #[test]
    fn test_subquery_carries_args() {
        let inner = Select::new()
            .column(Expr::func("MAX(total)"))
            .from("orders")
            .where_clause(cond::eq("status", "paid"));
        let expr = Expr::subquery(inner).alias("max_total");
        let (sql, params) = render(&expr, &PostgresDialect);
        assert_eq!(
            sql,
            "(SELECT MAX(total) FROM \"orders\" WHERE status = $1) AS max_total"
        );
        assert_eq!(params, 1);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(col("a").kind_name(), "identifier");
        assert_eq!(Expr::raw("1").kind_name(), "raw");
        assert_eq!(col("a").alias("b").kind_name(), "aliased");
        assert_eq!(Expr::subquery(Select::new()).kind_name(), "subquery");
    }
}
