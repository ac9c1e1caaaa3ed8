//! Merging two SELECT builders into one.

use super::select::Select;

impl Select {
    /// Merges `other` into this statement.
    ///
    /// Projection, joins, WHERE and HAVING conditions, GROUP BY and ORDER BY
    /// are concatenated, receiver first. The receiver's table and dialect are
    /// kept; `other`'s table is used only when the receiver has none. LIMIT
    /// takes the smaller value and OFFSET the larger when both are set.
    /// Passing `None` returns the receiver unchanged.
    ///
    /// ```rust
    /// use sqlweave_core::builder::{cond, select, Select, Statement};
    /// use sqlweave_core::dialect::PostgresDialect;
    ///
    /// let page = Select::new().limit(50).offset(100);
    /// let (sql, _) = select(["id"])
    ///     .from("users")
    ///     .where_clause(cond::eq("active", true))
    ///     .limit(20)
    ///     .compose(page)
    ///     .build_with(&PostgresDialect)
    ///     .unwrap();
    ///
    /// assert_eq!(sql, "SELECT \"id\" FROM \"users\" WHERE active = $1 LIMIT 20 OFFSET 100");
    /// ```
    #[must_use]
    pub fn compose(mut self, other: impl Into<Option<Self>>) -> Self {
        let Some(other) = other.into() else {
            return self;
        };
        if self.error.is_some() {
            return self;
        }
        if let Some(err) = other.error {
            self.error = Some(err);
            return self;
        }

        self.distinct |= other.distinct;
        self.columns.extend(other.columns);
        if self.from.is_none() {
            self.from = other.from;
        }
        self.joins.extend(other.joins);
        self.where_clause.extend(other.where_clause);
        self.group_by.extend(other.group_by);
        self.having.extend(other.having);
        self.order_by.extend(other.order_by);
        self.limit = merge(self.limit, other.limit, u64::min);
        self.offset = merge(self.offset, other.offset, u64::max);
        self
    }
}

fn merge(a: Option<u64>, b: Option<u64>, pick: fn(u64, u64) -> u64) -> Option<u64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(pick(a, b)),
        (a, b) => a.or(b),
    }
}
