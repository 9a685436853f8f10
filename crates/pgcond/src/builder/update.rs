//! UPDATE assembly.

use super::Builder;
use crate::condition::{Condition, where_connector};
use crate::error::{BuildError, BuildResult};
use crate::placeholder::PlaceholderIndex;
use crate::query::{BuiltQuery, StatementKind};
use crate::where_map::WhereSpec;
use serde_json::{Map, Value};

impl Builder {
    /// Build an UPDATE from a where-map and the fields to set.
    ///
    /// SET placeholders come first, WHERE placeholders continue after them:
    /// `UPDATE t SET a=$1,b=$2 WHERE (id=$3)`.
    ///
    /// # Errors
    /// [`BuildError::EmptySet`] if `set` is empty;
    /// [`BuildError::UnsupportedPseudoKey`] if `where_map` uses `_groupby`,
    /// `_orderby`, `_having` or `_limit`.
    pub fn update(
        &self,
        table: &str,
        where_map: &Map<String, Value>,
        set: &Map<String, Value>,
    ) -> BuildResult<BuiltQuery> {
        let result = WhereSpec::parse_filter(where_map, "UPDATE")
            .and_then(|conditions| self.render_update(table, &conditions, set));
        self.finish(StatementKind::Update, result)
    }

    /// Build an UPDATE from explicit conditions.
    pub fn update_conditions(
        &self,
        table: &str,
        conditions: &[Condition],
        set: &Map<String, Value>,
    ) -> BuildResult<BuiltQuery> {
        self.finish(StatementKind::Update, self.render_update(table, conditions, set))
    }

    fn render_update(
        &self,
        table: &str,
        conditions: &[Condition],
        set: &Map<String, Value>,
    ) -> BuildResult<BuiltQuery> {
        if set.is_empty() {
            return Err(BuildError::EmptySet);
        }

        let mut entries: Vec<(&String, &Value)> = set.iter().collect();
        entries.sort_by(|a, b| self.field_order.compare(a.0, b.0));

        let mut idx = PlaceholderIndex::new();
        let mut params = Vec::with_capacity(entries.len());

        let mut sql = String::with_capacity(64);
        sql.push_str("UPDATE ");
        sql.push_str(table);
        sql.push_str(" SET ");
        for (i, (field, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                sql.push(',');
            }
            sql.push_str(field);
            sql.push('=');
            idx.push_next(&mut sql);
            params.push(value.clone());
        }

        if let Some((clause, vals)) = where_connector(conditions, &self.field_order, &mut idx) {
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
            params.extend(vals);
        }

        Ok(BuiltQuery::new(sql, params))
    }
}
