//! INSERT assembly.

use super::Builder;
use crate::error::{BuildError, BuildResult};
use crate::placeholder::PlaceholderIndex;
use crate::query::{BuiltQuery, StatementKind};
use serde_json::{Map, Value};

impl Builder {
    /// Build a multi-row INSERT.
    ///
    /// The first record's keys, in field order, become the column list. Every
    /// record must carry exactly those keys. One placeholder tuple is emitted
    /// per record and numbered record by record:
    /// `INSERT INTO t (a,b) VALUES ($1,$2),($3,$4)`.
    ///
    /// # Errors
    /// [`BuildError::NoData`] for an empty record list (or a first record
    /// without columns), [`BuildError::DataMismatch`] if a record's keys
    /// differ from the first record's.
    pub fn insert(&self, table: &str, records: &[Map<String, Value>]) -> BuildResult<BuiltQuery> {
        self.finish(StatementKind::Insert, self.render_insert(table, records))
    }

    fn render_insert(&self, table: &str, records: &[Map<String, Value>]) -> BuildResult<BuiltQuery> {
        let first = records.first().ok_or(BuildError::NoData)?;
        if first.is_empty() {
            return Err(BuildError::NoData);
        }
        let columns = self.field_order.sorted_keys(first.keys());

        let mut idx = PlaceholderIndex::new();
        let mut params = Vec::with_capacity(columns.len() * records.len());

        let mut sql = String::with_capacity(32 + columns.len() * (8 + 4 * records.len()));
        sql.push_str("INSERT INTO ");
        sql.push_str(table);
        sql.push_str(" (");
        sql.push_str(&columns.join(","));
        sql.push_str(") VALUES ");

        for (i, record) in records.iter().enumerate() {
            if record.len() != columns.len() {
                return Err(BuildError::DataMismatch);
            }
            if i > 0 {
                sql.push(',');
            }
            sql.push('(');
            for (j, column) in columns.iter().enumerate() {
                let value = record.get(*column).ok_or(BuildError::DataMismatch)?;
                if j > 0 {
                    sql.push(',');
                }
                idx.push_next(&mut sql);
                params.push(value.clone());
            }
            sql.push(')');
        }

        Ok(BuiltQuery::new(sql, params))
    }
}
