//! The search pipeline over an external HTTP collaborator.

use log::debug;
use serde_json::Value;

use crate::error::{ErrorKind, Result, SearchError};
use crate::request::translate;
use crate::response::{project, ReturnType};

/// Error type surfaced unchanged from the transport.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// The HTTP collaborator: POST a JSON body to `<index>/_search` and
/// return the decoded JSON response.
///
/// Deadlines, retries and connection management all live behind this
/// seam; the pipeline itself performs no I/O.
pub trait Transport {
    /// Posts `body` to `path` and returns the response value.
    ///
    /// # Errors
    ///
    /// Any transport failure; it is surfaced as
    /// [`ErrorKind::Transport`] without interpretation.
    fn post(&self, path: &str, body: &Value) -> std::result::Result<Value, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, path: &str, body: &Value) -> std::result::Result<Value, TransportError> {
        (**self).post(path, body)
    }
}

/// Chains parse, translate, the HTTP round trip and projection.
pub struct ElseSearch<T> {
    transport: T,
    nil_value: String,
    debug: bool,
}

impl<T: Transport> ElseSearch<T> {
    /// Creates a client over the given transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            nil_value: String::new(),
            debug: false,
        }
    }

    /// Sets the placeholder printed for null cells in
    /// [`ReturnType::StringList`] results.
    #[must_use]
    pub fn nil_value(mut self, nil_value: impl Into<String>) -> Self {
        self.nil_value = nil_value.into();
        self
    }

    /// Enables `debug!`-level diagnostics for this client.
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Runs `query` and shapes the response as `return_type`.
    ///
    /// `after` is an externally supplied pagination cursor (a
    /// query-level `AFTER` clause wins over it); `index` names the
    /// target of a raw `{`-prefixed JSON query.
    ///
    /// # Errors
    ///
    /// The first failing stage aborts the pipeline; the error carries
    /// the query text, or the rendered request body once the query has
    /// been translated.
    pub fn search(
        &self,
        query: &str,
        return_type: ReturnType,
        after: Option<&str>,
        index: Option<&str>,
    ) -> Result<Value> {
        let translated = translate(query, after, index)?;
        let path = translated.path();
        let columns = translated.columns;
        let body = Value::Object(translated.body);
        let rendered = body.to_string();

        if self.debug {
            debug!("search {path} {rendered}");
        }

        let response = self
            .transport
            .post(&path, &body)
            .map_err(|e| SearchError::new(ErrorKind::Transport(e), rendered.as_str()))?;

        project(response, return_type, &columns, &self.nil_value)
            .map_err(|kind| SearchError::new(kind, rendered))
    }
}
