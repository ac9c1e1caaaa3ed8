//! Table and WHERE clauses shared by SELECT, UPDATE and DELETE.

use super::cond::Condition;
use super::expr::Expr;
use super::render::RenderContext;
use crate::error::{BuildError, Result};

/// The target table of a statement.
#[derive(Debug, Clone)]
pub(crate) struct TableClause {
    table: Expr,
}

impl TableClause {
    /// Wraps `table`, rejecting blank names.
    pub(crate) fn new(table: Expr) -> Result<Self> {
        if table.is_blank() {
            return Err(BuildError::EmptyTable);
        }
        Ok(Self { table })
    }

    /// Like [`new`](Self::new), for mutation statements, which only accept
    /// a plain or raw table reference.
    pub(crate) fn for_mutation(table: Expr, clause: &'static str) -> Result<Self> {
        match table {
            Expr::Ident(_) | Expr::Raw(_) => Self::new(table),
            other => Err(BuildError::UnsupportedExpression {
                clause,
                kind: other.kind_name(),
            }),
        }
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        self.table.render(ctx)
    }
}

/// An AND-joined list of conditions, used for both WHERE and HAVING.
#[derive(Debug, Clone, Default)]
pub(crate) struct WhereClause {
    conditions: Vec<Condition>,
}

impl WhereClause {
    /// Appends a condition, or returns the error it carries.
    pub(crate) fn push(&mut self, condition: Condition) -> Result<()> {
        if let Some(err) = condition.error() {
            return Err(err.clone());
        }
        self.conditions.push(condition);
        Ok(())
    }

    /// Appends another list as-is.
    pub(crate) fn extend(&mut self, other: Self) {
        self.conditions.extend(other.conditions);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Writes ` <keyword> c1 AND c2 ...`; nothing when empty.
    pub(crate) fn render(&self, keyword: &str, ctx: &mut RenderContext<'_>) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        ctx.push_sql(" ");
        ctx.push_sql(keyword);
        ctx.push_sql(" ");
        let single = self.conditions.len() == 1;
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                ctx.push_sql(" AND ");
            }
            // OR products keep their own precedence when joined with others
            let wrap = !single && condition.is_or();
            if wrap {
                ctx.push_sql("(");
            }
            condition.render(ctx)?;
            if wrap {
                ctx.push_sql(")");
            }
        }
        Ok(())
    }
}
