//! SELECT statement builder.
//!
//! Every method returns the builder. The first invalid call records an error,
//! after which further calls are ignored and `build()` returns that error.

use std::sync::Arc;

use super::clause::{TableClause, WhereClause};
use super::cond::Condition;
use super::expr::Expr;
use super::render::RenderContext;
use super::statement::Statement;
use crate::dialect::{Dialect, DialectRef};
use crate::error::{BuildError, Result};

/// Starts a SELECT with the given projection. An empty projection renders `*`.
///
/// ```rust
/// use sqlweave_core::builder::{cond, select, Statement};
/// use sqlweave_core::dialect::MySqlDialect;
///
/// let (sql, params) = select(["id", "name"])
///     .from("users")
///     .where_clause(cond::eq("active", true))
///     .with_dialect(MySqlDialect)
///     .build()
///     .unwrap();
///
/// assert_eq!(sql, "SELECT `id`, `name` FROM `users` WHERE active = ?");
/// assert_eq!(params.len(), 1);
/// ```
#[must_use]
pub fn select<I, E>(columns: I) -> Select
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Select::new().columns(columns)
}

/// Join flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `INNER JOIN`
    Inner,
    /// `LEFT JOIN`
    Left,
    /// `RIGHT JOIN`
    Right,
    /// `FULL JOIN`
    Full,
    /// `CROSS JOIN`, never has an ON clause.
    Cross,
}

impl JoinKind {
    /// SQL keyword for the join.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Join {
    kind: JoinKind,
    target: Expr,
    on: Option<(String, String)>,
}

impl Join {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        ctx.push_sql(self.kind.as_str());
        ctx.push_sql(" ");
        self.target.render(ctx)?;
        if let Some((left, right)) = &self.on {
            ctx.push_sql(" ON ");
            ctx.push_ident(left);
            ctx.push_sql(" = ");
            ctx.push_ident(right);
        }
        Ok(())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// `ASC`
    Asc,
    /// `DESC`
    Desc,
}

impl Order {
    /// SQL keyword for the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct OrderBy {
    expr: Expr,
    order: Option<Order>,
}

impl OrderBy {
    /// Splits a trailing `ASC`/`DESC` off an identifier or raw fragment.
    fn parse(expr: Expr) -> Self {
        let text = match &expr {
            Expr::Ident(text) | Expr::Raw(text) => text.trim(),
            _ => return Self { expr, order: None },
        };
        let Some((head, direction)) = text.rsplit_once(char::is_whitespace) else {
            return Self { expr, order: None };
        };
        let order = if direction.eq_ignore_ascii_case("ASC") {
            Order::Asc
        } else if direction.eq_ignore_ascii_case("DESC") {
            Order::Desc
        } else {
            return Self { expr, order: None };
        };
        let head = String::from(head.trim_end());
        let expr = match expr {
            Expr::Raw(_) => Expr::Raw(head),
            _ => Expr::Ident(head),
        };
        Self {
            expr,
            order: Some(order),
        }
    }
}

/// A SELECT statement builder.
#[derive(Debug, Clone, Default)]
pub struct Select {
    pub(crate) distinct: bool,
    pub(crate) columns: Vec<Expr>,
    pub(crate) from: Option<TableClause>,
    pub(crate) joins: Vec<Join>,
    pub(crate) where_clause: WhereClause,
    pub(crate) group_by: Vec<Expr>,
    pub(crate) having: WhereClause,
    pub(crate) order_by: Vec<OrderBy>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) error: Option<BuildError>,
    pub(crate) dialect: Option<DialectRef>,
}

impl Select {
    /// Creates an empty SELECT builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `err` unless an earlier error is already recorded.
    fn fail(&mut self, err: BuildError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Returns the first recorded error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    /// Appends columns to the projection.
    #[must_use]
    pub fn columns<I, E>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        if self.error.is_none() {
            self.columns.extend(columns.into_iter().map(Into::into));
        }
        self
    }

    /// Appends one projection expression.
    #[must_use]
    pub fn column(mut self, column: impl Into<Expr>) -> Self {
        if self.error.is_none() {
            self.columns.push(column.into());
        }
        self
    }

    /// Sets DISTINCT.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        if self.error.is_none() {
            self.distinct = true;
        }
        self
    }

    /// Sets the FROM target: a table name, raw fragment, aliased expression
    /// or subquery.
    #[must_use]
    pub fn from(mut self, table: impl Into<Expr>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match TableClause::new(table.into()) {
            Ok(table) => self.from = Some(table),
            Err(err) => self.fail(err),
        }
        self
    }

    fn push_join(mut self, kind: JoinKind, target: Expr, on: Option<(&str, &str)>) -> Self {
        if self.error.is_some() {
            return self;
        }
        if target.is_blank() {
            self.fail(BuildError::EmptyTable);
            return self;
        }
        self.joins.push(Join {
            kind,
            target,
            on: on.map(|(l, r)| (String::from(l), String::from(r))),
        });
        self
    }

    /// Adds a join of the given kind with `ON left = right`.
    #[must_use]
    pub fn join_with(self, kind: JoinKind, table: impl Into<Expr>, left: &str, right: &str) -> Self {
        let on = (kind != JoinKind::Cross).then_some((left, right));
        self.push_join(kind, table.into(), on)
    }

    /// Adds an INNER JOIN.
    #[must_use]
    pub fn join(self, table: impl Into<Expr>, left: &str, right: &str) -> Self {
        self.join_with(JoinKind::Inner, table, left, right)
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join(self, table: impl Into<Expr>, left: &str, right: &str) -> Self {
        self.join_with(JoinKind::Left, table, left, right)
    }

    /// Adds a RIGHT JOIN.
    #[must_use]
    pub fn right_join(self, table: impl Into<Expr>, left: &str, right: &str) -> Self {
        self.join_with(JoinKind::Right, table, left, right)
    }

    /// Adds a FULL JOIN.
    #[must_use]
    pub fn full_join(self, table: impl Into<Expr>, left: &str, right: &str) -> Self {
        self.join_with(JoinKind::Full, table, left, right)
    }

    /// Adds a CROSS JOIN.
    #[must_use]
    pub fn cross_join(self, table: impl Into<Expr>) -> Self {
        self.push_join(JoinKind::Cross, table.into(), None)
    }

    /// Adds a WHERE condition. Repeated calls are AND-joined.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<Condition>) -> Self {
        if self.error.is_none() {
            if let Err(err) = self.where_clause.push(condition.into()) {
                self.fail(err);
            }
        }
        self
    }

    /// Appends GROUP BY items. Only identifiers, raw fragments and function
    /// calls are accepted.
    #[must_use]
    pub fn group_by<I, E>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        for expr in columns.into_iter().map(Into::into) {
            if self.error.is_some() {
                break;
            }
            match expr {
                Expr::Ident(_) | Expr::Raw(_) | Expr::Func(_) => self.group_by.push(expr),
                other => self.fail(BuildError::UnsupportedExpression {
                    clause: "GROUP BY",
                    kind: other.kind_name(),
                }),
            }
        }
        self
    }

    /// Adds a HAVING condition. Repeated calls are AND-joined.
    #[must_use]
    pub fn having(mut self, condition: impl Into<Condition>) -> Self {
        if self.error.is_none() {
            if let Err(err) = self.having.push(condition.into()) {
                self.fail(err);
            }
        }
        self
    }

    fn push_order(mut self, expr: Expr, order: Option<Order>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match expr {
            Expr::Ident(_) | Expr::Raw(_) | Expr::Func(_) => {
                let mut item = OrderBy::parse(expr);
                if order.is_some() {
                    item.order = order;
                }
                self.order_by.push(item);
            }
            other => self.fail(BuildError::UnsupportedExpression {
                clause: "ORDER BY",
                kind: other.kind_name(),
            }),
        }
        self
    }

    /// Adds an ORDER BY item. A trailing `ASC`/`DESC` on an identifier, as in
    /// `"created_at DESC"`, is recognized.
    #[must_use]
    pub fn order_by(self, expr: impl Into<Expr>) -> Self {
        self.push_order(expr.into(), None)
    }

    /// Adds an ascending ORDER BY item.
    #[must_use]
    pub fn order_by_asc(self, expr: impl Into<Expr>) -> Self {
        self.push_order(expr.into(), Some(Order::Asc))
    }

    /// Adds a descending ORDER BY item.
    #[must_use]
    pub fn order_by_desc(self, expr: impl Into<Expr>) -> Self {
        self.push_order(expr.into(), Some(Order::Desc))
    }

    /// Adds a LIMIT clause.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        if self.error.is_none() {
            self.limit = Some(n);
        }
        self
    }

    /// Adds an OFFSET clause.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        if self.error.is_none() {
            self.offset = Some(n);
        }
        self
    }

    /// Builds this statement with `dialect` instead of the process-wide
    /// default.
    #[must_use]
    pub fn with_dialect<D: Dialect + 'static>(mut self, dialect: D) -> Self {
        self.dialect = Some(Arc::new(dialect));
        self
    }

    fn render_list(items: &[Expr], ctx: &mut RenderContext<'_>) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                ctx.push_sql(", ");
            }
            item.render(ctx)?;
        }
        Ok(())
    }
}

impl Statement for Select {
    fn dialect_override(&self) -> Option<&DialectRef> {
        self.dialect.as_ref()
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        ctx.push_sql("SELECT ");
        if self.distinct {
            ctx.push_sql("DISTINCT ");
        }
        if self.columns.is_empty() {
            ctx.push_sql("*");
        } else {
            Self::render_list(&self.columns, ctx)?;
        }

        if let Some(table) = &self.from {
            ctx.push_sql(" FROM ");
            table.render(ctx)?;
        }

        for join in &self.joins {
            ctx.push_sql(" ");
            join.render(ctx)?;
        }

        self.where_clause.render("WHERE", ctx)?;

        if !self.group_by.is_empty() {
            ctx.push_sql(" GROUP BY ");
            Self::render_list(&self.group_by, ctx)?;
        }

        self.having.render("HAVING", ctx)?;

        if !self.order_by.is_empty() {
            ctx.push_sql(" ORDER BY ");
            for (i, item) in self.order_by.iter().enumerate() {
                if i > 0 {
                    ctx.push_sql(", ");
                }
                item.expr.render(ctx)?;
                if let Some(order) = item.order {
                    ctx.push_sql(" ");
                    ctx.push_sql(order.as_str());
                }
            }
        }

        if let Some(n) = self.limit {
            ctx.push_sql(&format!(" LIMIT {n}"));
        }

        if let Some(n) = self.offset {
            ctx.push_sql(&format!(" OFFSET {n}"));
        }

        Ok(())
    }
}
