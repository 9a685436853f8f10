//! DELETE assembly.

use super::Builder;
use crate::condition::{Condition, where_connector};
use crate::error::BuildResult;
use crate::placeholder::PlaceholderIndex;
use crate::query::{BuiltQuery, StatementKind};
use crate::where_map::WhereSpec;
use serde_json::{Map, Value};

impl Builder {
    /// Build a DELETE from a where-map.
    ///
    /// An empty where-map yields an unconditional `DELETE FROM <table>`.
    /// Guarding against accidental full-table deletes is up to the caller.
    ///
    /// # Errors
    /// [`BuildError::UnsupportedPseudoKey`](crate::BuildError::UnsupportedPseudoKey)
    /// if `where_map` uses `_groupby`, `_orderby`, `_having` or `_limit`.
    pub fn delete(&self, table: &str, where_map: &Map<String, Value>) -> BuildResult<BuiltQuery> {
        let result = WhereSpec::parse_filter(where_map, "DELETE")
            .map(|conditions| self.render_delete(table, &conditions));
        self.finish(StatementKind::Delete, result)
    }

    /// Build a DELETE from explicit conditions.
    pub fn delete_conditions(&self, table: &str, conditions: &[Condition]) -> BuiltQuery {
        let query = self.render_delete(table, conditions);
        self.log_built(StatementKind::Delete, &query);
        query
    }

    fn render_delete(&self, table: &str, conditions: &[Condition]) -> BuiltQuery {
        let mut idx = PlaceholderIndex::new();
        let mut sql = format!("DELETE FROM {table}");
        match where_connector(conditions, &self.field_order, &mut idx) {
            Some((clause, params)) => {
                sql.push_str(" WHERE ");
                sql.push_str(&clause);
                BuiltQuery::new(sql, params)
            }
            None => BuiltQuery::new(sql, Vec::new()),
        }
    }
}
