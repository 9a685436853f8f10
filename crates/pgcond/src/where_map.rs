//! Where-map parsing.
//!
//! A where-map is a flat JSON object whose keys are `"field"` or
//! `"field <op>"`. Four reserved keys shape the rest of a SELECT instead of
//! naming a column:
//!
//! | key        | value                                   | clause                   |
//! |------------|-----------------------------------------|--------------------------|
//! | `_groupby` | `"department"`                          | `GROUP BY department`    |
//! | `_orderby` | `"age desc, id asc"`                    | `ORDER BY age DESC,id ASC` |
//! | `_having`  | nested where-map                        | `HAVING (...)`           |
//! | `_limit`   | `[first, second]`                       | `LIMIT first OFFSET second` |

use crate::condition::{Condition, FieldLists, FieldValues};
use crate::error::{BuildError, BuildResult};
use crate::op::{Op, parse_key};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Reserved key: GROUP BY field.
pub const GROUP_BY: &str = "_groupby";
/// Reserved key: ORDER BY list.
pub const ORDER_BY: &str = "_orderby";
/// Reserved key: HAVING conditions.
pub const HAVING: &str = "_having";
/// Reserved key: LIMIT / OFFSET pair.
pub const LIMIT: &str = "_limit";

/// Returns `true` for the reserved pseudo-keys.
pub fn is_pseudo_key(key: &str) -> bool {
    matches!(key, GROUP_BY | ORDER_BY | HAVING | LIMIT)
}

/// ORDER BY direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Parse a direction token case-insensitively.
    pub fn parse(token: &str) -> BuildResult<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Ok(Direction::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Ok(Direction::Desc)
        } else {
            Err(BuildError::OrderDirection(token.to_string()))
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One `field DIRECTION` entry of an ORDER BY list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    pub field: String,
    pub direction: Direction,
}

impl OrderSpec {
    /// Parse a comma-separated `field direction` list.
    ///
    /// A blank string yields an empty list.
    pub fn parse_list(s: &str) -> BuildResult<Vec<OrderSpec>> {
        if s.trim().is_empty() {
            return Ok(Vec::new());
        }
        s.split(',').map(OrderSpec::parse).collect()
    }

    fn parse(segment: &str) -> BuildResult<OrderSpec> {
        let mut words = segment.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some(field), Some(direction), None) => Ok(OrderSpec {
                field: field.to_string(),
                direction: Direction::parse(direction)?,
            }),
            _ => Err(BuildError::InvalidOrderBy(segment.trim().to_string())),
        }
    }
}

impl fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction.as_sql())
    }
}

/// The `_limit` pair.
///
/// Rendered verbatim as `LIMIT <first> OFFSET <second>`; the two numbers are
/// not reinterpreted as offset/count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitSpec {
    pub first: u64,
    pub second: u64,
}

impl fmt::Display for LimitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIMIT {} OFFSET {}", self.first, self.second)
    }
}

/// A parsed where-map.
///
/// `conditions` and `having` are kept as separate lists. The HAVING list is
/// only rendered by SELECT when `group_by` is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereSpec {
    pub conditions: Vec<Condition>,
    pub having: Vec<Condition>,
    pub group_by: Option<String>,
    pub order_by: Vec<OrderSpec>,
    pub limit: Option<LimitSpec>,
}

impl WhereSpec {
    /// Parse a where-map including its pseudo-keys.
    ///
    /// Pseudo-keys are recognised after trimming, like ordinary keys.
    /// `_having` is only read when `_groupby` is present; otherwise it is
    /// ignored without being validated.
    pub fn parse(map: &Map<String, Value>) -> BuildResult<Self> {
        let mut spec = WhereSpec {
            conditions: parse_conditions(map, None)?,
            ..WhereSpec::default()
        };

        if let Some(value) = pseudo_value(map, GROUP_BY) {
            let group_by = value
                .as_str()
                .ok_or_else(|| BuildError::invalid_pseudo_key(GROUP_BY, "a string"))?
                .trim();
            if !group_by.is_empty() {
                spec.group_by = Some(group_by.to_string());
            }
        }

        if let Some(value) = pseudo_value(map, ORDER_BY) {
            let order_by = value
                .as_str()
                .ok_or_else(|| BuildError::invalid_pseudo_key(ORDER_BY, "a string"))?;
            spec.order_by = OrderSpec::parse_list(order_by)?;
        }

        if let (Some(_), Some(value)) = (&spec.group_by, pseudo_value(map, HAVING)) {
            let having = value
                .as_object()
                .ok_or_else(|| BuildError::invalid_pseudo_key(HAVING, "an object"))?;
            spec.having = parse_conditions(having, Some("HAVING"))?;
        }

        if let Some(value) = pseudo_value(map, LIMIT) {
            spec.limit = Some(parse_limit(value)?);
        }

        Ok(spec)
    }

    /// Parse a where-map that may only contain conditions.
    ///
    /// Used by UPDATE and DELETE, which cannot express grouping, ordering or
    /// pagination. Any pseudo-key is rejected rather than dropped.
    pub fn parse_filter(map: &Map<String, Value>, statement: &'static str) -> BuildResult<Vec<Condition>> {
        parse_conditions(map, Some(statement))
    }
}

/// Value of a pseudo-key, matching keys with surrounding whitespace.
fn pseudo_value<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    map.get(name)
        .or_else(|| map.iter().find(|(key, _)| key.trim() == name).map(|(_, value)| value))
}

fn parse_limit(value: &Value) -> BuildResult<LimitSpec> {
    let invalid = || BuildError::invalid_pseudo_key(LIMIT, "an array of two non-negative integers");
    match value.as_array().map(Vec::as_slice) {
        Some([first, second]) => Ok(LimitSpec {
            first: first.as_u64().ok_or_else(invalid)?,
            second: second.as_u64().ok_or_else(invalid)?,
        }),
        _ => Err(invalid()),
    }
}

/// Convert ordinary keys into conditions in render order.
///
/// Pseudo-keys are skipped when `reject_pseudo` is `None`, otherwise they are
/// an error naming that statement. Keys are visited in sorted order so that
/// two keys naming the same field and operator (`"age >"`, `"age>"`) resolve
/// the same way on every call.
fn parse_conditions(
    map: &Map<String, Value>,
    reject_pseudo: Option<&'static str>,
) -> BuildResult<Vec<Condition>> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut scalars: BTreeMap<Op, FieldValues> = BTreeMap::new();
    let mut lists = FieldLists::new();

    for (key, value) in entries {
        if is_pseudo_key(key.trim()) {
            match reject_pseudo {
                Some(statement) => {
                    return Err(BuildError::UnsupportedPseudoKey {
                        key: key.trim().to_string(),
                        statement,
                    });
                }
                None => continue,
            }
        }

        let parsed = parse_key(key);
        if parsed.op == Op::In {
            let values = value
                .as_array()
                .ok_or_else(|| BuildError::InNotSequence(parsed.field.to_string()))?;
            lists.insert(parsed.field.to_string(), values.clone());
        } else {
            scalars
                .entry(parsed.op)
                .or_default()
                .insert(parsed.field.to_string(), value.clone());
        }
    }

    let mut conditions = Vec::new();
    for op in Op::ALL {
        if op == Op::In {
            if !lists.is_empty() {
                conditions.push(Condition::In(std::mem::take(&mut lists)));
            }
        } else if let Some(fields) = scalars.remove(&op) {
            conditions.push(Condition::from_values(op, fields));
        }
    }
    Ok(conditions)
}
