//! Error types for pgcond

use thiserror::Error;

/// Result type alias for statement builds.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors produced while turning a mapping or template into SQL.
///
/// All of them are deterministic input errors: retrying the same build
/// yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// INSERT called with an empty record list
    #[error("insert null data")]
    NoData,

    /// An INSERT record does not carry exactly the first record's columns
    #[error("insert data not match")]
    DataMismatch,

    /// ORDER BY direction other than ASC / DESC
    #[error("order param only should be ASC or DESC, got '{0}'")]
    OrderDirection(String),

    /// `_orderby` segment that is not a `field direction` pair
    #[error("invalid order by segment: '{0}'")]
    InvalidOrderBy(String),

    /// Template token with no binding
    #[error("{0} not found")]
    TokenNotFound(String),

    /// Pseudo-key carrying a value of the wrong shape
    #[error("invalid value for '{key}': expected {expected}")]
    InvalidPseudoKey { key: String, expected: &'static str },

    /// `in` operator bound to a non-array value
    #[error("value of '{0} in' must be an array")]
    InNotSequence(String),

    /// UPDATE with nothing to set
    #[error("update requires at least one field to set")]
    EmptySet,

    /// Pseudo-key that the statement cannot express
    #[error("'{key}' is not supported in {statement} statements")]
    UnsupportedPseudoKey {
        key: String,
        statement: &'static str,
    },
}

impl BuildError {
    /// Create a token-not-found error
    pub fn token_not_found(token: impl Into<String>) -> Self {
        Self::TokenNotFound(token.into())
    }

    pub(crate) fn invalid_pseudo_key(key: &str, expected: &'static str) -> Self {
        Self::InvalidPseudoKey {
            key: key.to_string(),
            expected,
        }
    }

    /// Check if this error came from INSERT input validation
    pub fn is_insert_error(&self) -> bool {
        matches!(self, Self::NoData | Self::DataMismatch)
    }

    /// Check if this error came from ORDER BY parsing
    pub fn is_order_error(&self) -> bool {
        matches!(self, Self::OrderDirection(_) | Self::InvalidOrderBy(_))
    }

    /// Check if this is a missing template token
    pub fn is_token_not_found(&self) -> bool {
        matches!(self, Self::TokenNotFound(_))
    }
}
