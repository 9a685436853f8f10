//! Build output.

use serde::Serialize;
use serde_json::Value;

/// The kind of statement a build produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatementKind {
    /// SELECT query
    Select,
    /// INSERT statement
    Insert,
    /// UPDATE statement
    Update,
    /// DELETE statement
    Delete,
    /// Rewritten `{{token}}` template
    Named,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Named => "NAMED",
        }
    }
}

/// SQL text with `$1, $2, ...` placeholders and the values they bind.
///
/// `params()[k - 1]` is the value for `$k`. Serializes as
/// `{"sql": ..., "params": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltQuery {
    sql: String,
    params: Vec<Value>,
}

impl BuiltQuery {
    pub(crate) fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Number of placeholders in the SQL text.
    pub fn placeholder_count(&self) -> usize {
        self.params.len()
    }

    /// Split into SQL text and bound values.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}
