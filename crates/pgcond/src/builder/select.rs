//! SELECT assembly.

use super::Builder;
use crate::condition::where_connector;
use crate::error::BuildResult;
use crate::placeholder::PlaceholderIndex;
use crate::query::{BuiltQuery, StatementKind};
use crate::where_map::WhereSpec;
use serde_json::{Map, Value};
use std::fmt::Write;

impl Builder {
    /// Build a SELECT from a where-map.
    ///
    /// Clauses are emitted in the order WHERE, GROUP BY, HAVING, ORDER BY,
    /// LIMIT. An empty `fields` slice selects `*`.
    pub fn select(
        &self,
        table: &str,
        where_map: &Map<String, Value>,
        fields: &[&str],
    ) -> BuildResult<BuiltQuery> {
        let result = WhereSpec::parse(where_map).map(|spec| self.render_select(table, &spec, fields));
        self.finish(StatementKind::Select, result)
    }

    /// Build a SELECT from an already parsed [`WhereSpec`].
    pub fn select_spec(&self, table: &str, spec: &WhereSpec, fields: &[&str]) -> BuiltQuery {
        let query = self.render_select(table, spec, fields);
        self.log_built(StatementKind::Select, &query);
        query
    }

    fn render_select(&self, table: &str, spec: &WhereSpec, fields: &[&str]) -> BuiltQuery {
        let mut idx = PlaceholderIndex::new();
        let mut params = Vec::new();

        let mut sql = String::with_capacity(64);
        sql.push_str("SELECT ");
        if fields.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&fields.join(","));
        }
        sql.push_str(" FROM ");
        sql.push_str(table);

        if let Some((clause, vals)) = where_connector(&spec.conditions, &self.field_order, &mut idx) {
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
            params.extend(vals);
        }

        if let Some(group_by) = &spec.group_by {
            sql.push_str(" GROUP BY ");
            sql.push_str(group_by);

            if let Some((clause, vals)) = where_connector(&spec.having, &self.field_order, &mut idx) {
                sql.push_str(" HAVING ");
                sql.push_str(&clause);
                params.extend(vals);
            }
        }

        if !spec.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            for (i, order) in spec.order_by.iter().enumerate() {
                if i > 0 {
                    sql.push(',');
                }
                // Writing into a String cannot fail.
                let _ = write!(sql, "{order}");
            }
        }

        if let Some(limit) = spec.limit {
            let _ = write!(sql, " {limit}");
        }

        BuiltQuery::new(sql, params)
    }
}
