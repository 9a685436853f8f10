//! Named-query templates.
//!
//! Rewrites hand-written SQL containing `{{token}}` markers into positional
//! `$n` placeholders:
//!
//! ```
//! use pgcond::named_query;
//! use serde_json::json;
//!
//! let bindings = json!({ "name": "caibirdme", "age": [1, 2, 3] });
//! let query = named_query(
//!     "select * from tb where name={{name}} and age in {{age}}",
//!     bindings.as_object().unwrap(),
//! )
//! .unwrap();
//! assert_eq!(query.sql(), "select * from tb where name=$1 and age in ($2,$3,$4)");
//! assert_eq!(query.params(), &[json!("caibirdme"), json!(1), json!(2), json!(3)]);
//! ```

use crate::builder::Builder;
use crate::error::{BuildError, BuildResult};
use crate::placeholder::PlaceholderIndex;
use crate::query::{BuiltQuery, StatementKind};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(r"\{\{\w+\}\}").expect("invalid built-in token regex"))
}

impl Builder {
    /// Rewrite a `{{token}}` template against `bindings`.
    ///
    /// Scalars become one placeholder. Arrays become a parenthesized list
    /// with one placeholder per element (`(NULL)` for an empty array). A
    /// token used twice is expanded twice and its values bound twice. Text
    /// outside markers is copied unchanged.
    ///
    /// # Errors
    /// [`BuildError::TokenNotFound`] for the first marker without a binding.
    pub fn named_query(&self, template: &str, bindings: &Map<String, Value>) -> BuildResult<BuiltQuery> {
        self.finish(StatementKind::Named, render_named(template, bindings))
    }
}

fn render_named(template: &str, bindings: &Map<String, Value>) -> BuildResult<BuiltQuery> {
    let mut idx = PlaceholderIndex::new();
    let mut params = Vec::new();
    let mut sql = String::with_capacity(template.len());
    let mut last = 0;

    for marker in token_regex().find_iter(template) {
        let text = marker.as_str();
        let token = &text[2..text.len() - 2];
        let value = bindings
            .get(token)
            .ok_or_else(|| BuildError::token_not_found(token))?;

        sql.push_str(&template[last..marker.start()]);
        match value {
            Value::Array(values) if values.is_empty() => sql.push_str("(NULL)"),
            Value::Array(values) => {
                sql.push('(');
                idx.push_list(&mut sql, values.len());
                sql.push(')');
                params.extend(values.iter().cloned());
            }
            scalar => {
                idx.push_next(&mut sql);
                params.push(scalar.clone());
            }
        }
        last = marker.end();
    }
    sql.push_str(&template[last..]);

    Ok(BuiltQuery::new(sql, params))
}
