//! Lowering a parsed [`Query`] into the backend `_search` request.

use elseql_core::{cursor, Expression, Parser, Query};
use serde_json::{json, Map, Value};

use crate::error::{ErrorKind, Result, SearchError};

/// A translated query: everything needed for the HTTP round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Translated {
    /// The `_search` request body.
    pub body: Map<String, Value>,
    /// Index segment of the request path; empty means all indices.
    pub index: String,
    /// Selected columns in textual order; empty when unknown.
    pub columns: Vec<String>,
}

impl Translated {
    /// The request path for the search endpoint.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}/_search", self.index)
    }
}

/// Translates ELSEQL text into a backend request.
///
/// A query starting with `{` skips the parser entirely and is used as
/// the request body verbatim; `index` names its target (there is no
/// `FROM` clause to consult) and the column list stays empty so the
/// projector discovers columns from the first hit.
///
/// `after` is an externally supplied pagination cursor; a query-level
/// `AFTER` clause wins over it.
///
/// # Errors
///
/// Parse, JSON and translation failures all come back as a
/// [`SearchError`] carrying the offending query text.
pub fn translate(text: &str, after: Option<&str>, index: Option<&str>) -> Result<Translated> {
    if text.starts_with('{') {
        let body: Value =
            serde_json::from_str(text).map_err(|e| SearchError::new(ErrorKind::Json(e.to_string()), text))?;
        let Value::Object(body) = body else {
            return Err(SearchError::new(
                ErrorKind::Json(String::from("expected an object")),
                text,
            ));
        };
        return Ok(Translated {
            body,
            index: index.unwrap_or_default().to_string(),
            columns: Vec::new(),
        });
    }

    let query = Parser::new(text)
        .parse()
        .map_err(|e| SearchError::new(e, text))?;

    translate_query(&query, after).map_err(|e| SearchError::new(e, text))
}

/// Lowers a parsed [`Query`] into the request body and index path.
///
/// # Errors
///
/// Rejects index names starting with `_` (other than `_all`) and
/// undecodable `AFTER` cursors.
pub fn translate_query(
    query: &Query,
    after: Option<&str>,
) -> std::result::Result<Translated, ErrorKind> {
    let mut body = Map::new();

    if let Some(where_expr) = &query.where_expr {
        body.insert(
            String::from("query"),
            json!({"query_string": {"query": where_expr.query_string()}}),
        );
    }

    if let Some(filter_expr) = &query.filter_expr {
        let filter = match filter_expr {
            Expression::Exists(field) => json!({"exists": {"field": field}}),
            Expression::Missing(field) => {
                json!({"bool": {"must_not": {"exists": {"field": field}}}})
            }
            other => json!({
                "query": {
                    "query_string": {
                        "query": other.query_string(),
                        "default_operator": "AND",
                    }
                }
            }),
        };

        // a filter-only query hoists the filter into the query slot
        if query.where_expr.is_some() {
            body.insert(String::from("filter"), filter);
        } else {
            body.insert(String::from("query"), filter);
        }
    }

    if !body.contains_key("query") {
        body.insert(String::from("query"), json!({"match_all": {}}));
    }

    if !query.facet_list.is_empty() {
        let mut aggs = Map::new();
        for facet in &query.facet_list {
            aggs.insert(facet.clone(), json!({"terms": {"field": facet}}));
        }
        body.insert(String::from("aggs"), Value::Object(aggs));
    }

    if let Some(script) = &query.script {
        let mut fields = Map::new();
        fields.insert(
            script.name.clone(),
            json!({"script": script.value.clone(), "lang": "expression"}),
        );
        body.insert(String::from("script_fields"), Value::Object(fields));
    }

    if !query.select_list.is_empty() {
        body.insert(String::from("_source"), json!(query.select_list));
    }

    let mut sort: Vec<Value> = query
        .order_list
        .iter()
        .map(|nv| {
            let mut entry = Map::new();
            entry.insert(nv.name.clone(), nv.value.clone());
            Value::Object(entry)
        })
        .collect();

    if query.has_limit() {
        body.insert(String::from("from"), json!(query.from));
        body.insert(String::from("size"), json!(query.size));
    }

    // the AFTER clause wins over an externally supplied cursor
    if let Some(token) = query.after.as_deref().or(after) {
        let decoded = cursor::decode(token)
            .ok_or_else(|| ErrorKind::Translation(String::from("invalid value for AFTER")))?;
        body.insert(String::from("search_after"), decoded);
        // search_after pagination needs a total order; close the sort
        // with the document id
        sort.push(json!({"_id": "asc"}));
    }

    if !sort.is_empty() {
        body.insert(String::from("sort"), Value::Array(sort));
    }

    let index = rewrite_index(&query.index)?;

    Ok(Translated {
        body,
        index,
        columns: query.select_list.clone(),
    })
}

/// Maps a `FROM` name onto the request path: the first `.` becomes a
/// `/` (type-qualified indices), `_all` becomes the empty string, and
/// any other `_`-leading name is rejected.
fn rewrite_index(name: &str) -> std::result::Result<String, ErrorKind> {
    let index = name.replacen('.', "/", 1);

    if index == "_all" {
        return Ok(String::new());
    }

    if index.starts_with('_') {
        return Err(ErrorKind::Translation(format!("invalid index name: {name}")));
    }

    Ok(index)
}
