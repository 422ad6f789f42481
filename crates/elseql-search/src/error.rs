//! Error types for the search pipeline.

use elseql_core::ParseError;
use thiserror::Error;

/// What went wrong. The first error aborts the pipeline; no partial
/// result is ever returned.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Malformed ELSEQL input.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Post-parse translation failure: invalid index name, undecodable
    /// `AFTER` cursor.
    #[error("{0}")]
    Translation(String),

    /// A `{`-prefixed query that is not a valid JSON object.
    #[error("invalid JSON body: {0}")]
    Json(String),

    /// Surfaced unchanged from the HTTP collaborator.
    #[error("transport: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The backend response lacks the expected structure, or a row
    /// projects into incompatible nested lists.
    #[error("{0}")]
    Shape(String),
}

/// An [`ErrorKind`] paired with the text that produced it: the query
/// string, or the rendered request body once translation succeeded.
#[derive(Debug, Error)]
#[error("Error: {kind} Query: {query}")]
pub struct SearchError {
    /// The underlying failure.
    #[source]
    pub kind: ErrorKind,
    /// The offending query text or rendered request body.
    pub query: String,
}

impl SearchError {
    /// Wraps `kind` with the query text it applies to.
    pub fn new(kind: impl Into<ErrorKind>, query: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            query: query.into(),
        }
    }
}

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_query_text() {
        let err = SearchError::new(
            ErrorKind::Translation(String::from("invalid value for AFTER")),
            "SELECT * FROM t AFTER \"x\"",
        );
        let rendered = err.to_string();
        assert!(rendered.contains("invalid value for AFTER"));
        assert!(rendered.contains("SELECT * FROM t"));
    }
}
