//! The parsed statement carrier.

use super::{Expression, NameValue};

/// Output of a successful parse. Built in a single pass and immutable
/// afterwards; fields follow clause order.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// `SELECT` paths in textual order; empty means all fields (`*`).
    pub select_list: Vec<String>,
    /// `FACETS` paths for terms aggregations.
    pub facet_list: Vec<String>,
    /// `SCRIPT name = "source"`.
    pub script: Option<NameValue>,
    /// `FROM` target index.
    pub index: String,
    /// Scoring query (`WHERE`).
    pub where_expr: Option<Expression>,
    /// Non-scoring filter (`FILTER`).
    pub filter_expr: Option<Expression>,
    /// `ORDER BY` entries, each `{field: "asc"|"desc"}` — or a single
    /// `{"_script": …}` entry for the quoted-string form.
    pub order_list: Vec<NameValue>,
    /// Result window offset (`LIMIT from, size`).
    pub from: i64,
    /// Result window size; -1 until a `LIMIT` clause sets it.
    pub size: i64,
    /// Opaque pagination cursor (`AFTER`).
    pub after: Option<String>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            select_list: Vec::new(),
            facet_list: Vec::new(),
            script: None,
            index: String::new(),
            where_expr: None,
            filter_expr: None,
            order_list: Vec::new(),
            from: 0,
            size: -1,
            after: None,
        }
    }
}

impl Query {
    /// Returns true when a `LIMIT` clause set the result window.
    #[must_use]
    pub const fn has_limit(&self) -> bool {
        self.size >= 0
    }
}
