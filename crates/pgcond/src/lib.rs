//! # pgcond
//!
//! Build parameterized Postgres SQL from plain key/value data.
//!
//! ## Features
//!
//! - **Map-driven statements**: SELECT / INSERT / UPDATE / DELETE from JSON objects
//! - **Operator suffixes**: `"age >="`, `"sex in"`, `"name like"` in where-map keys
//! - **Clause pseudo-keys**: `_groupby`, `_orderby`, `_having`, `_limit`
//! - **Named templates**: rewrite `{{token}}` markers into `$n` placeholders
//! - **Deterministic output**: field order never depends on map iteration order
//!
//! ## Statements
//!
//! ```
//! use serde_json::json;
//!
//! let where_map = json!({
//!     "age >=": 21,
//!     "sex in": ["male", "female"],
//!     "hobby in": ["soccer", "basketball", "tenis"],
//! });
//! let query = pgcond::build_delete("tb", where_map.as_object().unwrap()).unwrap();
//! assert_eq!(
//!     query.sql(),
//!     "DELETE FROM tb WHERE (hobby IN ($1,$2,$3) AND sex IN ($4,$5) AND age>=$6)"
//! );
//! assert_eq!(query.params().len(), 6);
//! ```
//!
//! Every build returns a [`BuiltQuery`]: the SQL text and the values for
//! `$1, $2, ...` in order. Failed builds return a [`BuildError`] and no SQL.
//!
//! The free functions use a default [`Builder`]. Construct one yourself to
//! change the field ordering or (feature `tracing`) statement logging.

pub mod builder;
pub mod condition;
pub mod error;
pub mod field_order;
pub mod named;
pub mod op;
pub mod placeholder;
pub mod query;
pub mod where_map;

#[cfg(feature = "postgres")]
pub mod pg;

#[cfg(feature = "tracing")]
mod trace;

pub use builder::Builder;
pub use condition::{Condition, FieldLists, FieldValues, where_connector};
pub use error::{BuildError, BuildResult};
pub use field_order::FieldOrder;
pub use op::{Op, ParsedKey, parse_key};
pub use placeholder::PlaceholderIndex;
pub use query::{BuiltQuery, StatementKind};
pub use where_map::{Direction, LimitSpec, OrderSpec, WhereSpec};

#[cfg(feature = "postgres")]
pub use pg::PgParams;

#[cfg(feature = "tracing")]
pub use trace::SqlTrace;

use serde_json::{Map, Value};

/// Build a SELECT with the default [`Builder`].
///
/// See [`Builder::select`].
pub fn build_select(
    table: &str,
    where_map: &Map<String, Value>,
    fields: &[&str],
) -> BuildResult<BuiltQuery> {
    Builder::new().select(table, where_map, fields)
}

/// Build a multi-row INSERT with the default [`Builder`].
///
/// See [`Builder::insert`].
pub fn build_insert(table: &str, records: &[Map<String, Value>]) -> BuildResult<BuiltQuery> {
    Builder::new().insert(table, records)
}

/// Build an UPDATE with the default [`Builder`].
///
/// See [`Builder::update`].
pub fn build_update(
    table: &str,
    where_map: &Map<String, Value>,
    set: &Map<String, Value>,
) -> BuildResult<BuiltQuery> {
    Builder::new().update(table, where_map, set)
}

/// Build a DELETE with the default [`Builder`].
///
/// See [`Builder::delete`].
pub fn build_delete(table: &str, where_map: &Map<String, Value>) -> BuildResult<BuiltQuery> {
    Builder::new().delete(table, where_map)
}

/// Rewrite a `{{token}}` template with the default [`Builder`].
///
/// See [`Builder::named_query`].
pub fn named_query(template: &str, bindings: &Map<String, Value>) -> BuildResult<BuiltQuery> {
    Builder::new().named_query(template, bindings)
}
