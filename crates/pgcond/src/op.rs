//! Comparison operators and the key tokenizer.
//!
//! Where-map keys carry their operator as a suffix: `"age >="`, `"sex in"`,
//! `"name like"`. [`parse_key`] splits such a key into the field name and an
//! [`Op`]; a key without a recognised suffix compares for equality.

use std::fmt;

/// Comparison operator recognised in where-map keys.
///
/// The declaration order is the order in which conditions of different
/// operators are rendered inside one WHERE / HAVING clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Op {
    /// Equal: `field=$n`
    Eq,
    /// Set membership: `field IN ($n,...)`
    In,
    /// Not equal: `field!=$n` (`<>` and `!=` both map here)
    Ne,
    /// Greater than: `field>$n`
    Gt,
    /// Greater than or equal: `field>=$n`
    Gte,
    /// Less than: `field<$n`
    Lt,
    /// Less than or equal: `field<=$n`
    Lte,
    /// Pattern match: `field LIKE $n`
    Like,
}

impl Op {
    /// All operators in render order.
    pub const ALL: [Op; 8] = [
        Op::Eq,
        Op::In,
        Op::Ne,
        Op::Gt,
        Op::Gte,
        Op::Lt,
        Op::Lte,
        Op::Like,
    ];

    /// SQL spelling of the operator.
    pub fn as_sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::In => "IN",
            Op::Ne => "!=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Like => "LIKE",
        }
    }

    /// Recognise a single operator token.
    ///
    /// Symbolic tokens must match exactly; `in` and `like` are matched
    /// case-insensitively.
    pub fn from_token(token: &str) -> Option<Op> {
        let op = match token {
            "=" => Op::Eq,
            "<>" | "!=" => Op::Ne,
            ">" => Op::Gt,
            ">=" => Op::Gte,
            "<" => Op::Lt,
            "<=" => Op::Lte,
            word if word.eq_ignore_ascii_case("in") => Op::In,
            word if word.eq_ignore_ascii_case("like") => Op::Like,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A where-map key split into field and operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedKey<'a> {
    pub field: &'a str,
    pub op: Op,
}

fn is_symbol(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '!')
}

/// Split a where-map key into its field name and operator.
///
/// The key is trimmed, then the trailing token is examined:
///
/// - a run of `< > = !` characters (attached or separated by whitespace),
/// - otherwise the last whitespace-separated word (`in` / `like`).
///
/// If that token is not an operator, or nothing precedes it, the whole
/// trimmed key is the field and the operator is [`Op::Eq`].
pub fn parse_key(key: &str) -> ParsedKey<'_> {
    let key = key.trim();
    let whole = ParsedKey {
        field: key,
        op: Op::Eq,
    };

    let field_end = key.trim_end_matches(is_symbol).len();
    if field_end < key.len() {
        let field = key[..field_end].trim_end();
        return match Op::from_token(&key[field_end..]) {
            Some(op) if !field.is_empty() => ParsedKey { field, op },
            _ => whole,
        };
    }

    if let Some((field, word)) = key.rsplit_once(char::is_whitespace) {
        let field = field.trim_end();
        match Op::from_token(word) {
            Some(op @ (Op::In | Op::Like)) if !field.is_empty() => {
                return ParsedKey { field, op };
            }
            _ => {}
        }
    }

    whole
}
