//! Predicates for WHERE and HAVING clauses.
//!
//! A [`Condition`] is dialect-neutral: leaf predicates are written with `?`
//! markers and keep their values in marker order, and nested subqueries are
//! stored unrendered. The statement that finally renders the condition
//! decides quoting and placeholder numbering.
//!
//! Column names in conditions are written as given, not quoted.
//!
//! ```rust
//! use sqlweave_core::builder::cond::{and, eq, gt, or};
//! use sqlweave_core::dialect::GenericDialect;
//!
//! let c = or(and(eq("active", true), gt("age", 18)), eq("admin", true));
//! let (sql, params) = c.build(&GenericDialect).unwrap();
//! assert_eq!(sql, "(active = ? AND age > ?) OR (admin = ?)");
//! assert_eq!(params.len(), 3);
//! ```
//!
//! Invalid predicates (NULL with `>`, an empty IN list, ...) don't fail here.
//! The condition carries the error and the statement reports it from
//! `build()`.

use super::expr::Expr;
use super::render::RenderContext;
use super::select::Select;
use super::value::{SqlValue, ToSqlValue};
use crate::dialect::Dialect;
use crate::error::{BuildError, Result};

/// Comparison operators for [`compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
}

impl Op {
    /// The SQL spelling of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
        }
    }
}

#[derive(Debug, Clone)]
enum Part {
    Text { sql: String, params: Vec<SqlValue> },
    Subquery(Box<Select>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Leaf,
    And,
    Or,
}

/// A composable boolean SQL fragment with its own ordered arguments.
#[derive(Debug, Clone)]
pub struct Condition {
    parts: Vec<Part>,
    shape: Shape,
    error: Option<BuildError>,
}

impl Condition {
    fn leaf(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            parts: vec![Part::Text {
                sql: sql.into(),
                params,
            }],
            shape: Shape::Leaf,
            error: None,
        }
    }

    fn failed(error: BuildError) -> Self {
        Self {
            parts: vec![],
            shape: Shape::Leaf,
            error: Some(error),
        }
    }

    fn empty(shape: Shape) -> Self {
        Self {
            parts: vec![],
            shape,
            error: None,
        }
    }

    fn push_text(&mut self, text: &str) {
        self.push_part(Part::Text {
            sql: String::from(text),
            params: vec![],
        });
    }

    fn push_param(&mut self, value: SqlValue) {
        self.push_part(Part::Text {
            sql: String::from("?"),
            params: vec![value],
        });
    }

    fn push_part(&mut self, part: Part) {
        match part {
            Part::Text {
                sql: more,
                params: more_params,
            } => {
                if let Some(Part::Text { sql, params }) = self.parts.last_mut() {
                    sql.push_str(&more);
                    params.extend(more_params);
                } else {
                    self.parts.push(Part::Text {
                        sql: more,
                        params: more_params,
                    });
                }
            }
            part @ Part::Subquery(_) => self.parts.push(part),
        }
    }

    /// Appends `other`'s parts, keeping the first error.
    fn append(&mut self, other: Self) {
        if self.error.is_none() {
            self.error = other.error;
        }
        for part in other.parts {
            self.push_part(part);
        }
    }

    /// Appends `other`, parenthesized when it came from an OR.
    fn append_and_operand(&mut self, other: Self) {
        if other.shape == Shape::Or {
            self.push_text("(");
            self.append(other);
            self.push_text(")");
        } else {
            self.append(other);
        }
    }

    /// `self AND other`. An operand produced by [`or`](Self::or) is wrapped
    /// in parentheses; plain leaves and AND chains are not.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let mut out = Self::empty(Shape::And);
        out.append_and_operand(self);
        out.push_text(" AND ");
        out.append_and_operand(other);
        out
    }

    /// `(self) OR (other)`. Both sides are always parenthesized.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        let mut out = Self::empty(Shape::Or);
        out.push_text("(");
        out.append(self);
        out.push_text(") OR (");
        out.append(other);
        out.push_text(")");
        out
    }

    /// `NOT (self)`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        let mut out = Self::empty(Shape::Leaf);
        out.push_text("NOT (");
        out.append(self);
        out.push_text(")");
        out
    }

    /// The error recorded while constructing this condition, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    pub(crate) fn is_or(&self) -> bool {
        self.shape == Shape::Or
    }

    /// Writes the condition into `ctx`, renumbering its placeholders.
    ///
    /// # Errors
    ///
    /// Returns the construction error, or a nested subquery's failure.
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        for part in &self.parts {
            match part {
                Part::Text { sql, params } => ctx.push_fragment(sql, params),
                Part::Subquery(select) => ctx.push_subquery(select)?,
            }
        }
        Ok(())
    }

    /// Renders the condition on its own.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn build(&self, dialect: &dyn Dialect) -> Result<(String, Vec<SqlValue>)> {
        let mut ctx = RenderContext::new(dialect);
        self.render(&mut ctx)?;
        Ok(ctx.finish())
    }
}

/// `column <op> ?`.
///
/// A NULL value rewrites `=` to `IS NULL` and `!=` to `IS NOT NULL` without
/// binding anything. NULL with any other operator is an error.
#[must_use]
pub fn compare<V: ToSqlValue>(column: &str, op: Op, value: V) -> Condition {
    let value = value.to_sql_value();
    if value.is_null() {
        return match op {
            Op::Eq => is_null(column),
            Op::Ne => is_not_null(column),
            _ => Condition::failed(BuildError::NullValue {
                column: String::from(column),
                operator: op.as_str(),
            }),
        };
    }
    Condition::leaf(format!("{column} {} ?", op.as_str()), vec![value])
}

/// `column = ?`, or `column IS NULL` for a NULL value.
#[must_use]
pub fn eq<V: ToSqlValue>(column: &str, value: V) -> Condition {
    compare(column, Op::Eq, value)
}

/// `column != ?`, or `column IS NOT NULL` for a NULL value.
#[must_use]
pub fn ne<V: ToSqlValue>(column: &str, value: V) -> Condition {
    compare(column, Op::Ne, value)
}

/// `column > ?`.
#[must_use]
pub fn gt<V: ToSqlValue>(column: &str, value: V) -> Condition {
    compare(column, Op::Gt, value)
}

/// `column >= ?`.
#[must_use]
pub fn gte<V: ToSqlValue>(column: &str, value: V) -> Condition {
    compare(column, Op::Gte, value)
}

/// `column < ?`.
#[must_use]
pub fn lt<V: ToSqlValue>(column: &str, value: V) -> Condition {
    compare(column, Op::Lt, value)
}

/// `column <= ?`.
#[must_use]
pub fn lte<V: ToSqlValue>(column: &str, value: V) -> Condition {
    compare(column, Op::Lte, value)
}

/// `column LIKE ?`.
#[must_use]
pub fn like<V: ToSqlValue>(column: &str, pattern: V) -> Condition {
    compare(column, Op::Like, pattern)
}

/// `column NOT LIKE ?`.
#[must_use]
pub fn not_like<V: ToSqlValue>(column: &str, pattern: V) -> Condition {
    compare(column, Op::NotLike, pattern)
}

fn membership<I, V>(column: &str, values: I, operator: &'static str) -> Condition
where
    I: IntoIterator<Item = V>,
    V: ToSqlValue,
{
    let values: Vec<SqlValue> = values.into_iter().map(ToSqlValue::to_sql_value).collect();
    if values.is_empty() {
        return Condition::failed(BuildError::EmptyList {
            column: String::from(column),
            operator,
        });
    }
    if values.iter().any(SqlValue::is_null) {
        return Condition::failed(BuildError::NullValue {
            column: String::from(column),
            operator,
        });
    }
    let markers = vec!["?"; values.len()].join(", ");
    Condition::leaf(format!("{column} {operator} ({markers})"), values)
}

/// `column IN (?, ?, ...)`. An empty list or a NULL element is an error.
#[must_use]
pub fn in_list<I, V>(column: &str, values: I) -> Condition
where
    I: IntoIterator<Item = V>,
    V: ToSqlValue,
{
    membership(column, values, "IN")
}

/// `column NOT IN (?, ?, ...)`. An empty list or a NULL element is an
/// error.
#[must_use]
pub fn not_in<I, V>(column: &str, values: I) -> Condition
where
    I: IntoIterator<Item = V>,
    V: ToSqlValue,
{
    membership(column, values, "NOT IN")
}

fn subquery_membership(column: &str, select: Select, operator: &str) -> Condition {
    let mut out = Condition::empty(Shape::Leaf);
    out.push_text(&format!("{column} {operator} "));
    out.push_part(Part::Subquery(Box::new(select)));
    out
}

/// `column IN (SELECT ...)`.
#[must_use]
pub fn in_subquery(column: &str, select: Select) -> Condition {
    subquery_membership(column, select, "IN")
}

/// `column NOT IN (SELECT ...)`.
#[must_use]
pub fn not_in_subquery(column: &str, select: Select) -> Condition {
    subquery_membership(column, select, "NOT IN")
}

fn range<L: ToSqlValue, H: ToSqlValue>(
    column: &str,
    low: L,
    high: H,
    operator: &'static str,
) -> Condition {
    let bounds = vec![low.to_sql_value(), high.to_sql_value()];
    if bounds.iter().any(SqlValue::is_null) {
        return Condition::failed(BuildError::NullValue {
            column: String::from(column),
            operator,
        });
    }
    Condition::leaf(format!("{column} {operator} ? AND ?"), bounds)
}

/// `column BETWEEN ? AND ?`. A NULL bound is an error.
#[must_use]
pub fn between<L: ToSqlValue, H: ToSqlValue>(column: &str, low: L, high: H) -> Condition {
    range(column, low, high, "BETWEEN")
}

/// `column NOT BETWEEN ? AND ?`.
#[must_use]
pub fn not_between<L: ToSqlValue, H: ToSqlValue>(column: &str, low: L, high: H) -> Condition {
    range(column, low, high, "NOT BETWEEN")
}

/// `column IS NULL`.
#[must_use]
pub fn is_null(column: &str) -> Condition {
    Condition::leaf(format!("{column} IS NULL"), vec![])
}

/// `column IS NOT NULL`.
#[must_use]
pub fn is_not_null(column: &str) -> Condition {
    Condition::leaf(format!("{column} IS NOT NULL"), vec![])
}

fn existence(target: Expr, keyword: &'static str) -> Condition {
    match target {
        Expr::Subquery(select) => {
            let mut out = Condition::empty(Shape::Leaf);
            out.push_text(&format!("{keyword} "));
            out.push_part(Part::Subquery(select));
            out
        }
        Expr::Raw(sql) => Condition::leaf(format!("{keyword} ({sql})"), vec![]),
        other => Condition::failed(BuildError::UnsupportedExpression {
            clause: keyword,
            kind: other.kind_name(),
        }),
    }
}

/// `EXISTS (...)` over a subquery or a raw fragment. Any other expression
/// is an error.
#[must_use]
pub fn exists(target: impl Into<Expr>) -> Condition {
    existence(target.into(), "EXISTS")
}

/// `NOT EXISTS (...)` over a subquery or a raw fragment.
#[must_use]
pub fn not_exists(target: impl Into<Expr>) -> Condition {
    existence(target.into(), "NOT EXISTS")
}

/// A raw predicate without bound values.
///
/// The text must not contain `?`: every `?` counts as a placeholder.
#[must_use]
pub fn raw(sql: &str) -> Condition {
    raw_with(sql, Vec::<SqlValue>::new())
}

/// A raw predicate whose `?` markers bind `params` in order.
///
/// **Warning**: only use this for SQL fragments that don't contain user
/// input; pass user input through `params`.
#[must_use]
pub fn raw_with<I, V>(sql: &str, params: I) -> Condition
where
    I: IntoIterator<Item = V>,
    V: ToSqlValue,
{
    let params: Vec<SqlValue> = params.into_iter().map(ToSqlValue::to_sql_value).collect();
    let placeholders = sql.matches('?').count();
    if placeholders != params.len() {
        return Condition::failed(BuildError::PlaceholderCount {
            sql: String::from(sql),
            placeholders,
            params: params.len(),
        });
    }
    Condition::leaf(sql, params)
}

/// `NOT (condition)`.
#[must_use]
pub fn not(condition: Condition) -> Condition {
    condition.not()
}

/// `a AND b`. See [`Condition::and`].
#[must_use]
pub fn and(a: Condition, b: Condition) -> Condition {
    a.and(b)
}

/// `(a) OR (b)`. See [`Condition::or`].
#[must_use]
pub fn or(a: Condition, b: Condition) -> Condition {
    a.or(b)
}

/// Starts a `CASE WHEN ... THEN ? [ELSE ?] END` expression.
#[must_use]
pub fn case() -> Case {
    Case::default()
}

/// Builder for a CASE expression; converts into a [`Condition`].
#[derive(Debug, Clone, Default)]
pub struct Case {
    branches: Vec<(Condition, SqlValue)>,
    otherwise: Option<SqlValue>,
}

impl Case {
    /// Adds a `WHEN condition THEN ?` branch.
    #[must_use]
    pub fn when<V: ToSqlValue>(mut self, condition: Condition, then: V) -> Self {
        self.branches.push((condition, then.to_sql_value()));
        self
    }

    /// Sets the `ELSE ?` value.
    #[must_use]
    pub fn otherwise<V: ToSqlValue>(mut self, value: V) -> Self {
        self.otherwise = Some(value.to_sql_value());
        self
    }
}

impl From<Case> for Condition {
    fn from(case: Case) -> Self {
        if case.branches.is_empty() {
            return Self::failed(BuildError::EmptyCase);
        }
        let mut out = Self::empty(Shape::Leaf);
        out.push_text("CASE");
        for (condition, then) in case.branches {
            out.push_text(" WHEN ");
            out.append(condition);
            out.push_text(" THEN ");
            out.push_param(then);
        }
        if let Some(value) = case.otherwise {
            out.push_text(" ELSE ");
            out.push_param(value);
        }
        out.push_text(" END");
        out
    }
}
