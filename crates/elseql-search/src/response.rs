//! Shaping backend responses into the requested return form.

use elseql_core::cursor;
use serde_json::{json, Map, Value};

use crate::error::ErrorKind;

/// How search results are shaped on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnType {
    /// The backend response, unchanged.
    Full,
    /// `_source` documents plus total, facets and the `last` cursor.
    #[default]
    Data,
    /// Tabular rows aligned to a column list.
    List,
    /// Like `List`, with every cell coerced to its string form.
    StringList,
}

/// Shapes a backend response.
///
/// `columns` is the translated select list; when empty, `List` and
/// `StringList` derive their columns from the sorted keys of the first
/// hit's `_source`. `nil_value` is the placeholder printed for null
/// cells in `StringList` results.
///
/// # Errors
///
/// Returns [`ErrorKind::Shape`] when the response lacks the
/// `hits.hits`/`hits.total` structure, or when one row extracts
/// several unrelated multi-element lists.
pub fn project(
    response: Value,
    return_type: ReturnType,
    columns: &[String],
    nil_value: &str,
) -> std::result::Result<Value, ErrorKind> {
    if return_type == ReturnType::Full {
        return Ok(response);
    }

    let hits = response
        .get("hits")
        .and_then(Value::as_object)
        .ok_or_else(|| shape("response has no hits object"))?;
    let list = hits
        .get("hits")
        .and_then(Value::as_array)
        .ok_or_else(|| shape("response has no hits list"))?;
    let total = hits
        .get("total")
        .and_then(as_count)
        .ok_or_else(|| shape("response has no total count"))?;

    let mut data = Map::new();
    if let Some(aggs) = response.get("aggregations") {
        data.insert(String::from("facets"), aggs.clone());
    }

    let mut last = None;

    match return_type {
        ReturnType::Data => {
            let mut rows = Vec::with_capacity(list.len());
            for hit in list {
                rows.push(hit.get("_source").cloned().unwrap_or(Value::Null));
                if let Some(sort) = hit.get("sort") {
                    last = Some(sort.clone());
                }
            }
            data.insert(String::from("rows"), Value::Array(rows));
        }

        ReturnType::List | ReturnType::StringList => {
            let mut columns = columns.to_vec();
            if columns.is_empty() {
                if let Some(first) = list.first() {
                    // assume the first hit carries all the field names
                    columns = source_of(first)?.keys().cloned().collect();
                    columns.sort();
                }
            }

            let mut rows = Vec::new();
            for hit in list {
                let source = source_of(hit)?;
                if let Some(sort) = hit.get("sort") {
                    last = Some(sort.clone());
                }

                let cells: Vec<Value> = columns
                    .iter()
                    .map(|path| getpath(source, path))
                    .collect();

                for row in fan_out(cells, &columns)? {
                    let row = if return_type == ReturnType::StringList {
                        row.iter()
                            .map(|cell| Value::String(stringify(cell, nil_value)))
                            .collect()
                    } else {
                        row
                    };
                    rows.push(Value::Array(row));
                }
            }

            data.insert(String::from("columns"), json!(columns));
            data.insert(String::from("rows"), Value::Array(rows));
        }

        ReturnType::Full => unreachable!(),
    }

    data.insert(String::from("total"), json!(total));
    if let Some(sort) = last {
        data.insert(String::from("last"), Value::String(cursor::encode(&sort)));
    }

    Ok(Value::Object(data))
}

fn shape(message: &str) -> ErrorKind {
    ErrorKind::Shape(String::from(message))
}

/// Accepts the hit count as any JSON number.
fn as_count(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}

fn source_of(hit: &Value) -> std::result::Result<&Map<String, Value>, ErrorKind> {
    hit.get("_source")
        .and_then(Value::as_object)
        .ok_or_else(|| shape("hit has no _source document"))
}

/// Extracts the value at a dot-separated path of `source`.
///
/// Maps descend by key (a missing key yields null). A list applies the
/// remaining path to every element, producing a parallel list. A
/// scalar reached with segments left over yields null.
fn getpath(source: &Map<String, Value>, path: &str) -> Value {
    let segments: Vec<&str> = path.split('.').collect();
    match source.get(segments[0]) {
        Some(value) => walk(value, &segments[1..]),
        None => Value::Null,
    }
}

fn walk(value: &Value, segments: &[&str]) -> Value {
    if segments.is_empty() {
        return value.clone();
    }
    match value {
        Value::Object(map) => map
            .get(segments[0])
            .map_or(Value::Null, |v| walk(v, &segments[1..])),
        Value::Array(items) => Value::Array(items.iter().map(|v| walk(v, segments)).collect()),
        _ => Value::Null,
    }
}

/// Expands a row whose cells hold multi-element lists.
///
/// A single-element list unwraps to its scalar. A multi-element list
/// fans the row out into one row per element, repeating the other
/// cells. Several cells may fan out together only when their columns
/// share a dotted parent path (they advance in lockstep, padding with
/// null); otherwise the projection fails.
fn fan_out(
    cells: Vec<Value>,
    columns: &[String],
) -> std::result::Result<Vec<Vec<Value>>, ErrorKind> {
    let fanning: Vec<usize> = cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| matches!(cell, Value::Array(items) if items.len() > 1))
        .map(|(i, _)| i)
        .collect();

    if fanning.is_empty() {
        return Ok(vec![cells.into_iter().map(unwrap_single).collect()]);
    }

    let parent = parent_path(&columns[fanning[0]]);
    if fanning.iter().any(|&i| parent_path(&columns[i]) != parent) {
        return Err(shape("too many nested lists in result"));
    }

    let rows = fanning
        .iter()
        .map(|&i| cells[i].as_array().map_or(0, Vec::len))
        .max()
        .unwrap_or(0);

    Ok((0..rows)
        .map(|row| {
            cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if fanning.contains(&i) {
                        cell.as_array()
                            .and_then(|items| items.get(row))
                            .cloned()
                            .unwrap_or(Value::Null)
                    } else {
                        unwrap_single(cell.clone())
                    }
                })
                .collect()
        })
        .collect())
}

fn unwrap_single(value: Value) -> Value {
    match value {
        Value::Array(mut items) if items.len() == 1 => items.remove(0),
        other => other,
    }
}

fn parent_path(path: &str) -> &str {
    path.rsplit_once('.').map_or("", |(parent, _)| parent)
}

/// Coerces a cell to its string form: strings verbatim, null as the
/// configured placeholder, containers as compact JSON, numbers and
/// booleans bare.
fn stringify(value: &Value, nil_value: &str) -> String {
    match value {
        Value::Null => String::from(nil_value),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_getpath_scalar() {
        let doc = source(json!({"a": {"b": {"c": 42}}}));
        assert_eq!(getpath(&doc, "a.b.c"), json!(42));
    }

    #[test]
    fn test_getpath_missing_key_is_null() {
        let doc = source(json!({"a": 1}));
        assert_eq!(getpath(&doc, "b"), Value::Null);
        assert_eq!(getpath(&doc, "a.b"), Value::Null);
    }

    #[test]
    fn test_getpath_maps_over_lists() {
        let doc = source(json!({"tags": [{"name": "a"}, {"name": "b"}]}));
        assert_eq!(getpath(&doc, "tags.name"), json!(["a", "b"]));
    }

    #[test]
    fn test_fan_out_not_needed() {
        let rows = fan_out(vec![json!(1), json!("x")], &cols(&["a", "b"])).unwrap();
        assert_eq!(rows, vec![vec![json!(1), json!("x")]]);
    }

    #[test]
    fn test_fan_out_unwraps_single_element_lists() {
        let rows = fan_out(vec![json!([7]), json!("x")], &cols(&["a", "b"])).unwrap();
        assert_eq!(rows, vec![vec![json!(7), json!("x")]]);
    }

    #[test]
    fn test_fan_out_conflicting_lists() {
        let err = fan_out(
            vec![json!([1, 2]), json!(["a", "b", "c"])],
            &cols(&["nums", "tags"]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("too many nested lists"));
    }

    #[test]
    fn test_fan_out_same_parent_advances_in_lockstep() {
        let rows = fan_out(
            vec![json!(["rome", "oslo"]), json!(["it", "no"]), json!(1)],
            &cols(&["addr.city", "addr.country", "id"]),
        )
        .unwrap();
        assert_eq!(
            rows,
            vec![
                vec![json!("rome"), json!("it"), json!(1)],
                vec![json!("oslo"), json!("no"), json!(1)],
            ]
        );
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!(null), "<nil>"), "<nil>");
        assert_eq!(stringify(&json!("plain"), ""), "plain");
        assert_eq!(stringify(&json!(42), ""), "42");
        assert_eq!(stringify(&json!(true), ""), "true");
        assert_eq!(stringify(&json!({"a": [1, 2]}), ""), r#"{"a":[1,2]}"#);
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| String::from(*s)).collect()
    }
}
