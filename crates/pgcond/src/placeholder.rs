//! Positional placeholder numbering.

use std::fmt::Write;

/// The `$n` counter of one statement build.
///
/// A build creates exactly one index and passes it by `&mut` to every clause
/// it renders, so numbers keep increasing across WHERE, HAVING, SET and
/// VALUES and are never reused. The counter is bumped right before a value
/// is bound: the n-th call to [`next`](Self::next) yields `$n`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlaceholderIndex {
    current: usize,
}

impl PlaceholderIndex {
    /// Start a fresh index at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance and return the next placeholder number.
    pub fn next(&mut self) -> usize {
        self.current += 1;
        self.current
    }

    /// Highest placeholder number handed out so far.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Advance and append `$n` to `out`.
    pub fn push_next(&mut self, out: &mut String) {
        let n = self.next();
        // Writing into a String cannot fail.
        let _ = write!(out, "${n}");
    }

    /// Advance `count` times and append `$a,$b,...` to `out`.
    pub fn push_list(&mut self, out: &mut String, count: usize) {
        for i in 0..count {
            if i > 0 {
                out.push(',');
            }
            self.push_next(out);
        }
    }
}
