//! `tokio-postgres` parameter adapter.
//!
//! Converts the JSON values of a [`BuiltQuery`] into boxed [`ToSql`] values
//! so the statement can be handed straight to a tokio-postgres client:
//!
//! ```ignore
//! let query = pgcond::build_select("users", where_map, &[])?;
//! let params = query.pg_params();
//! let rows = client.query(query.sql(), &params.as_refs()).await?;
//! ```

use crate::query::BuiltQuery;
use serde_json::Value;
use tokio_postgres::types::ToSql;

/// Owned tokio-postgres parameters for one statement.
#[derive(Debug, Default)]
pub struct PgParams {
    params: Vec<Box<dyn ToSql + Sync + Send>>,
}

impl PgParams {
    /// Convert values in placeholder order.
    ///
    /// Scalars map to native types (`NULL` as a text null, bool, `int8`,
    /// `float8`, `text`); arrays and objects are sent as JSON.
    pub fn from_values(values: &[Value]) -> Self {
        Self {
            params: values.iter().map(to_sql_value).collect(),
        }
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get all parameters as references for tokio-postgres.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| &**p as &(dyn ToSql + Sync))
            .collect()
    }
}

fn to_sql_value(value: &Value) -> Box<dyn ToSql + Sync + Send> {
    match value {
        Value::Null => Box::new(None::<String>),
        Value::Bool(b) => Box::new(*b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Box::new(i),
            (None, Some(f)) => Box::new(f),
            (None, None) => Box::new(n.to_string()),
        },
        Value::String(s) => Box::new(s.clone()),
        Value::Array(_) | Value::Object(_) => Box::new(value.clone()),
    }
}

impl BuiltQuery {
    /// Bound values converted for tokio-postgres.
    pub fn pg_params(&self) -> PgParams {
        PgParams::from_values(self.params())
    }
}
