//! Map-driven statement assemblers.
//!
//! A [`Builder`] carries the configuration shared by every build (field
//! ordering and, with the `tracing` feature, statement logging). Each build
//! owns one [`PlaceholderIndex`](crate::PlaceholderIndex) and threads it
//! through its clauses in text order, so `$n` always refers to
//! `params()[n - 1]`.
//!
//! ```
//! use pgcond::Builder;
//! use serde_json::json;
//!
//! let builder = Builder::new();
//! let where_map = json!({ "age > ": 23 });
//! let query = builder
//!     .select("tb", where_map.as_object().unwrap(), &["count(*) as total"])
//!     .unwrap();
//! assert_eq!(query.sql(), "SELECT count(*) as total FROM tb WHERE (age>$1)");
//! assert_eq!(query.params(), &[json!(23)]);
//! ```

mod delete;
mod insert;
mod select;
mod update;

use crate::error::{BuildError, BuildResult};
use crate::field_order::FieldOrder;
use crate::query::{BuiltQuery, StatementKind};

#[cfg(feature = "tracing")]
use crate::trace::SqlTrace;

/// Statement builder configuration.
///
/// Construct once, then share freely: a `Builder` is immutable, `Clone`,
/// `Send` and `Sync`, and builds never share mutable state.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Builder {
    field_order: FieldOrder,
    #[cfg(feature = "tracing")]
    trace: SqlTrace,
}

impl Builder {
    /// Create a builder with lexicographic field order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different strategy for sorting field names.
    ///
    /// # Example
    /// ```
    /// use pgcond::{Builder, FieldOrder};
    /// use serde_json::json;
    ///
    /// let builder = Builder::new().field_order(FieldOrder::custom(|a, b| b.cmp(a)));
    /// let set = json!({ "a": 1, "b": 2 });
    /// let query = builder
    ///     .update("t", &Default::default(), set.as_object().unwrap())
    ///     .unwrap();
    /// assert_eq!(query.sql(), "UPDATE t SET b=$1,a=$2");
    /// ```
    pub fn field_order(mut self, order: FieldOrder) -> Self {
        self.field_order = order;
        self
    }

    /// Override statement logging settings.
    #[cfg(feature = "tracing")]
    pub fn trace(mut self, trace: SqlTrace) -> Self {
        self.trace = trace;
        self
    }

    /// The configured field order.
    pub fn order(&self) -> &FieldOrder {
        &self.field_order
    }

    pub(crate) fn finish(
        &self,
        kind: StatementKind,
        result: BuildResult<BuiltQuery>,
    ) -> BuildResult<BuiltQuery> {
        match &result {
            Ok(query) => self.log_built(kind, query),
            Err(err) => self.log_failed(kind, err),
        }
        result
    }

    #[cfg(feature = "tracing")]
    pub(crate) fn log_built(&self, kind: StatementKind, query: &BuiltQuery) {
        self.trace.built(kind, query);
    }

    #[cfg(feature = "tracing")]
    fn log_failed(&self, kind: StatementKind, err: &BuildError) {
        self.trace.failed(kind, err);
    }

    #[cfg(not(feature = "tracing"))]
    pub(crate) fn log_built(&self, _kind: StatementKind, _query: &BuiltQuery) {}

    #[cfg(not(feature = "tracing"))]
    fn log_failed(&self, _kind: StatementKind, _err: &BuildError) {}
}

#[cfg(test)]
mod tests;
