//! The trait shared by every buildable statement.

use tracing::{debug, trace};

use super::debug::interpolate;
use super::render::RenderContext;
use super::value::SqlValue;
use crate::dialect::{default_dialect, Dialect, DialectRef};
use crate::error::Result;

/// A statement that can be rendered to SQL text plus ordered arguments.
///
/// Implementors provide [`render`](Statement::render); `build`,
/// `build_with` and `debug_sql` are derived from it. Building never mutates
/// the statement and can be repeated.
pub trait Statement {
    /// The dialect set with `with_dialect`, if any.
    fn dialect_override(&self) -> Option<&DialectRef>;

    /// Writes the statement into `ctx`, returning the first recorded error.
    ///
    /// # Errors
    ///
    /// Returns the error recorded during configuration, or one found while
    /// rendering (invalid INSERT rows, unsupported dialect features, nested
    /// statement failures).
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()>;

    /// Builds with the statement's own dialect, or the process-wide default.
    ///
    /// The default is read once, before rendering starts.
    ///
    /// # Errors
    ///
    /// See [`render`](Statement::render).
    fn build(&self) -> Result<(String, Vec<SqlValue>)> {
        match self.dialect_override() {
            Some(dialect) => self.build_with(dialect.as_ref()),
            None => {
                let dialect = default_dialect();
                self.build_with(dialect.as_ref())
            }
        }
    }

    /// Builds with an explicit dialect, ignoring both the override and the
    /// process-wide default.
    ///
    /// # Errors
    ///
    /// See [`render`](Statement::render).
    fn build_with(&self, dialect: &dyn Dialect) -> Result<(String, Vec<SqlValue>)> {
        let mut ctx = RenderContext::new(dialect);
        if let Err(err) = self.render(&mut ctx) {
            debug!(dialect = dialect.name(), error = %err, "statement build failed");
            return Err(err);
        }
        let (sql, params) = ctx.finish();
        debug!(
            dialect = dialect.name(),
            params = params.len(),
            "statement built"
        );
        trace!(sql = %sql);
        Ok((sql, params))
    }

    /// Builds the statement and inlines the arguments, for logging only.
    ///
    /// **Warning**: the result is not injection-safe. Never execute it.
    ///
    /// # Errors
    ///
    /// See [`render`](Statement::render).
    fn debug_sql(&self) -> Result<String> {
        let dialect = self
            .dialect_override()
            .cloned()
            .unwrap_or_else(default_dialect);
        let (sql, params) = self.build_with(dialect.as_ref())?;
        Ok(interpolate(&sql, &params, dialect.as_ref()))
    }
}
