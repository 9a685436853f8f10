//! Statement logging through `tracing`.
//!
//! A [`Builder`](crate::Builder) carrying a [`SqlTrace`] emits one event per
//! build on target `pgcond.sql`:
//!
//! ```ignore
//! let builder = Builder::new().trace(SqlTrace::at(Level::INFO).sql_limit(None));
//! ```

use crate::error::BuildError;
use crate::query::{BuiltQuery, StatementKind};
use std::borrow::Cow;
use tracing::Level;

const DEFAULT_SQL_LIMIT: usize = 200;

/// Level and SQL length limit for build events.
///
/// Successful builds log the statement kind, the SQL and the bound value
/// count at the configured level. Failed builds always log at `WARN`.
#[derive(Debug, Clone)]
pub struct SqlTrace {
    level: Level,
    sql_limit: Option<usize>,
}

impl Default for SqlTrace {
    fn default() -> Self {
        Self::at(Level::DEBUG)
    }
}

impl SqlTrace {
    /// Log successful builds at `level`, SQL cut to 200 bytes.
    pub fn at(level: Level) -> Self {
        Self {
            level,
            sql_limit: Some(DEFAULT_SQL_LIMIT),
        }
    }

    /// Byte limit for logged SQL; `None` logs it whole.
    pub fn sql_limit(mut self, limit: Option<usize>) -> Self {
        self.sql_limit = limit;
        self
    }

    fn shown_sql<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        match self.sql_limit {
            Some(limit) if sql.len() > limit => {
                Cow::Owned(format!("{}...", &sql[..char_floor(sql, limit)]))
            }
            _ => Cow::Borrowed(sql),
        }
    }

    pub(crate) fn built(&self, kind: StatementKind, query: &BuiltQuery) {
        macro_rules! event_at {
            ($($args:tt)*) => {
                match self.level {
                    Level::ERROR => tracing::error!($($args)*),
                    Level::WARN => tracing::warn!($($args)*),
                    Level::INFO => tracing::info!($($args)*),
                    Level::DEBUG => tracing::debug!($($args)*),
                    Level::TRACE => tracing::trace!($($args)*),
                }
            };
        }

        let sql = self.shown_sql(query.sql());
        event_at!(
            target: "pgcond.sql",
            statement = kind.as_str(),
            sql = %sql,
            params = query.placeholder_count(),
            "built statement"
        );
    }

    pub(crate) fn failed(&self, kind: StatementKind, err: &BuildError) {
        tracing::warn!(
            target: "pgcond.sql",
            statement = kind.as_str(),
            error = %err,
            "statement build failed"
        );
    }
}

/// Largest char boundary of `s` not past `limit`.
fn char_floor(s: &str, limit: usize) -> usize {
    s.char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= limit)
        .last()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_floor_stays_on_boundaries() {
        assert_eq!(char_floor("abcdef", 3), 3);
        // 'é' spans bytes 1..3
        assert_eq!(char_floor("aé", 2), 1);
        assert_eq!(char_floor("", 5), 0);
    }

    #[test]
    fn long_sql_is_cut_with_ellipsis() {
        let trace = SqlTrace::at(Level::INFO).sql_limit(Some(6));
        assert_eq!(trace.shown_sql("SELECT * FROM tb"), "SELECT...");
        assert_eq!(trace.shown_sql("SELECT"), "SELECT");

        let whole = trace.sql_limit(None);
        assert_eq!(whole.shown_sql("SELECT * FROM tb"), "SELECT * FROM tb");
    }

    #[test]
    fn default_logs_at_debug() {
        let trace = SqlTrace::default();
        assert_eq!(trace.level, Level::DEBUG);
        assert_eq!(trace.sql_limit, Some(DEFAULT_SQL_LIMIT));
    }
}
