//! Deterministic ordering of field names.
//!
//! Mappings have no reliable iteration order, so every renderer collects the
//! keys it needs and sorts them with a [`FieldOrder`] before numbering
//! placeholders. The order is part of a [`Builder`](crate::Builder)'s
//! configuration rather than process-wide state.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

type Compare = dyn Fn(&str, &str) -> Ordering + Send + Sync;

/// Strategy used to sort field names before rendering.
#[derive(Clone, Default)]
pub enum FieldOrder {
    /// Byte-wise lexicographic order (`str::cmp`).
    #[default]
    Lexicographic,
    /// ASCII case-insensitive order, ties broken lexicographically.
    CaseInsensitive,
    /// Caller supplied comparator. It must be a total order.
    Custom(Arc<Compare>),
}

impl FieldOrder {
    /// Wrap a comparator function.
    pub fn custom<F>(compare: F) -> Self
    where
        F: Fn(&str, &str) -> Ordering + Send + Sync + 'static,
    {
        FieldOrder::Custom(Arc::new(compare))
    }

    /// Compare two field names.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            FieldOrder::Lexicographic => a.cmp(b),
            FieldOrder::CaseInsensitive => a
                .bytes()
                .map(|b| b.to_ascii_lowercase())
                .cmp(b.bytes().map(|b| b.to_ascii_lowercase()))
                .then_with(|| a.cmp(b)),
            FieldOrder::Custom(compare) => (**compare)(a, b),
        }
    }

    /// Sort field names in place.
    pub fn sort<S: AsRef<str>>(&self, fields: &mut [S]) {
        fields.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }

    /// Collect the keys of a mapping and return them sorted.
    pub fn sorted_keys<'a, I>(&self, keys: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut keys: Vec<&str> = keys.into_iter().map(String::as_str).collect();
        self.sort(&mut keys);
        keys
    }
}

impl fmt::Debug for FieldOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldOrder::Lexicographic => f.write_str("Lexicographic"),
            FieldOrder::CaseInsensitive => f.write_str("CaseInsensitive"),
            FieldOrder::Custom(_) => f.debug_tuple("Custom").field(&"<fn>").finish(),
        }
    }
}
