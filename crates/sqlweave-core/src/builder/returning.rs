//! `RETURNING` suffix for mutation statements.

use std::sync::Arc;

use super::render::RenderContext;
use super::statement::Statement;
use crate::dialect::{Dialect, DialectRef};
use crate::error::{BuildError, Result};

/// A statement followed by ` RETURNING <columns>`.
///
/// Created by `returning` on [`Insert`](super::Insert),
/// [`Update`](super::Update) and [`Delete`](super::Delete). The inner
/// statement renders unchanged. Building fails with
/// [`BuildError::Unsupported`] when the dialect has no RETURNING support.
#[derive(Debug, Clone)]
pub struct Returning<S> {
    inner: S,
    columns: Vec<String>,
    dialect: Option<DialectRef>,
}

impl<S: Statement> Returning<S> {
    /// Wraps `inner`. An empty column list renders `RETURNING *`.
    #[must_use]
    pub fn new<I, C>(inner: S, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            inner,
            columns: columns.into_iter().map(Into::into).collect(),
            dialect: None,
        }
    }

    /// The wrapped statement.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Builds this statement with `dialect` instead of the process-wide
    /// default, taking precedence over one set on the inner statement.
    #[must_use]
    pub fn with_dialect<D: Dialect + 'static>(mut self, dialect: D) -> Self {
        self.dialect = Some(Arc::new(dialect));
        self
    }
}

impl<S: Statement> Statement for Returning<S> {
    fn dialect_override(&self) -> Option<&DialectRef> {
        self.dialect
            .as_ref()
            .or_else(|| self.inner.dialect_override())
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        self.inner.render(ctx)?;
        let dialect = ctx.dialect();
        if !dialect.supports_returning() {
            return Err(BuildError::Unsupported {
                dialect: dialect.name(),
                feature: "RETURNING",
            });
        }
        ctx.push_sql(" RETURNING ");
        if self.columns.is_empty() {
            ctx.push_sql("*");
        } else {
            ctx.push_ident_list(&self.columns);
        }
        Ok(())
    }
}
