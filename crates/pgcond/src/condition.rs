//! Condition model for map-driven WHERE / HAVING clauses.
//!
//! A [`Condition`] groups every field compared with the same operator. It
//! renders into clause fragments plus the values they bind, numbering
//! placeholders through the build's shared [`PlaceholderIndex`].
//!
//! # Example
//! ```
//! use pgcond::{Condition, FieldOrder, PlaceholderIndex};
//! use serde_json::json;
//!
//! let cond = Condition::eq([("foo", json!("bar")), ("baz", json!(1))]);
//! let mut idx = PlaceholderIndex::new();
//! let (frags, vals) = cond.build(&FieldOrder::default(), &mut idx);
//! assert_eq!(frags, vec!["baz=$1", "foo=$2"]);
//! assert_eq!(vals, vec![json!(1), json!("bar")]);
//! ```

use crate::field_order::FieldOrder;
use crate::op::Op;
use crate::placeholder::PlaceholderIndex;
use serde_json::Value;
use std::collections::HashMap;

/// Fields compared against a single value each.
pub type FieldValues = HashMap<String, Value>;

/// Fields tested for membership in a list of values.
pub type FieldLists = HashMap<String, Vec<Value>>;

/// One operator applied to a set of fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `field=$n`
    Eq(FieldValues),
    /// `field!=$n`
    Ne(FieldValues),
    /// `field<$n`
    Lt(FieldValues),
    /// `field<=$n`
    Lte(FieldValues),
    /// `field>$n`
    Gt(FieldValues),
    /// `field>=$n`
    Gte(FieldValues),
    /// `field LIKE $n`
    Like(FieldValues),
    /// `field IN ($n,...)`
    In(FieldLists),
}

macro_rules! scalar_constructors {
    ($($(#[$doc:meta])* $name:ident => $variant:ident;)+) => {
        $(
            $(#[$doc])*
            pub fn $name<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
            where
                K: Into<String>,
                V: Into<Value>,
            {
                Condition::$variant(
                    fields
                        .into_iter()
                        .map(|(k, v)| (k.into(), v.into()))
                        .collect(),
                )
            }
        )+
    };
}

impl Condition {
    scalar_constructors! {
        /// Equality condition over the given fields.
        eq => Eq;
        /// Not-equal condition over the given fields.
        ne => Ne;
        /// Less-than condition over the given fields.
        lt => Lt;
        /// Less-or-equal condition over the given fields.
        lte => Lte;
        /// Greater-than condition over the given fields.
        gt => Gt;
        /// Greater-or-equal condition over the given fields.
        gte => Gte;
        /// LIKE condition over the given fields.
        like => Like;
    }

    /// IN condition; each field maps to its candidate values.
    pub fn in_list<K, V>(fields: impl IntoIterator<Item = (K, Vec<V>)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Condition::In(
            fields
                .into_iter()
                .map(|(k, vs)| (k.into(), vs.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }

    /// Wrap scalar comparisons for `op`.
    ///
    /// `Op::In` needs lists; every value is treated as a one-element list.
    pub fn from_values(op: Op, fields: FieldValues) -> Self {
        match op {
            Op::Eq => Condition::Eq(fields),
            Op::Ne => Condition::Ne(fields),
            Op::Lt => Condition::Lt(fields),
            Op::Lte => Condition::Lte(fields),
            Op::Gt => Condition::Gt(fields),
            Op::Gte => Condition::Gte(fields),
            Op::Like => Condition::Like(fields),
            Op::In => Condition::In(fields.into_iter().map(|(k, v)| (k, vec![v])).collect()),
        }
    }

    /// Operator of this condition.
    pub fn op(&self) -> Op {
        match self {
            Condition::Eq(_) => Op::Eq,
            Condition::Ne(_) => Op::Ne,
            Condition::Lt(_) => Op::Lt,
            Condition::Lte(_) => Op::Lte,
            Condition::Gt(_) => Op::Gt,
            Condition::Gte(_) => Op::Gte,
            Condition::Like(_) => Op::Like,
            Condition::In(_) => Op::In,
        }
    }

    /// Number of fields in this condition.
    pub fn len(&self) -> usize {
        match self {
            Condition::In(fields) => fields.len(),
            Condition::Eq(fields)
            | Condition::Ne(fields)
            | Condition::Lt(fields)
            | Condition::Lte(fields)
            | Condition::Gt(fields)
            | Condition::Gte(fields)
            | Condition::Like(fields) => fields.len(),
        }
    }

    /// `true` if the condition has no fields and renders nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render clause fragments and their bound values.
    ///
    /// Fields are visited in `order`. IN lists keep their element order. An
    /// empty condition renders nothing; an empty IN list renders `1=0`.
    pub fn build(&self, order: &FieldOrder, idx: &mut PlaceholderIndex) -> (Vec<String>, Vec<Value>) {
        match self {
            Condition::In(fields) => build_in(fields, order, idx),
            Condition::Eq(fields)
            | Condition::Ne(fields)
            | Condition::Lt(fields)
            | Condition::Lte(fields)
            | Condition::Gt(fields)
            | Condition::Gte(fields)
            | Condition::Like(fields) => build_cmp(fields, self.op(), order, idx),
        }
    }
}

fn sorted_entries<'a, V>(
    fields: &'a HashMap<String, V>,
    order: &FieldOrder,
) -> Vec<(&'a String, &'a V)> {
    let mut entries: Vec<_> = fields.iter().collect();
    entries.sort_by(|a, b| order.compare(a.0, b.0));
    entries
}

fn build_cmp(
    fields: &FieldValues,
    op: Op,
    order: &FieldOrder,
    idx: &mut PlaceholderIndex,
) -> (Vec<String>, Vec<Value>) {
    let mut conds = Vec::with_capacity(fields.len());
    let mut vals = Vec::with_capacity(fields.len());
    for (field, value) in sorted_entries(fields, order) {
        let mut cond = String::with_capacity(field.len() + 8);
        cond.push_str(field);
        if op == Op::Like {
            cond.push_str(" LIKE ");
        } else {
            cond.push_str(op.as_sql());
        }
        idx.push_next(&mut cond);
        conds.push(cond);
        vals.push(value.clone());
    }
    (conds, vals)
}

fn build_in(
    fields: &FieldLists,
    order: &FieldOrder,
    idx: &mut PlaceholderIndex,
) -> (Vec<String>, Vec<Value>) {
    let mut conds = Vec::with_capacity(fields.len());
    let mut vals = Vec::new();
    for (field, values) in sorted_entries(fields, order) {
        if values.is_empty() {
            // Empty IN list - matches no row
            conds.push("1=0".to_string());
            continue;
        }
        let mut cond = String::with_capacity(field.len() + 6 + values.len() * 4);
        cond.push_str(field);
        cond.push_str(" IN (");
        idx.push_list(&mut cond, values.len());
        cond.push(')');
        conds.push(cond);
        vals.extend(values.iter().cloned());
    }
    (conds, vals)
}

/// Render a condition list as one parenthesized `AND` group.
///
/// Returns `None` when no condition produced a fragment, so callers can omit
/// the clause keyword entirely.
pub fn where_connector(
    conditions: &[Condition],
    order: &FieldOrder,
    idx: &mut PlaceholderIndex,
) -> Option<(String, Vec<Value>)> {
    let mut clause = String::new();
    let mut values = Vec::new();
    let mut first = true;
    for condition in conditions {
        let (conds, vals) = condition.build(order, idx);
        for cond in conds {
            clause.push_str(if first { "(" } else { " AND " });
            clause.push_str(&cond);
            first = false;
        }
        values.extend(vals);
    }
    if first {
        return None;
    }
    clause.push(')');
    Some((clause, values))
}
