//! Tests for response shaping: the four return forms, path
//! extraction, column discovery and nested fan-out.

use elseql_core::cursor;
use elseql_search::{project, ErrorKind, ReturnType};
use serde_json::{json, Value};

fn response() -> Value {
    json!({
        "took": 3,
        "hits": {
            "total": 2,
            "hits": [
                {
                    "_source": {"sku": "a-1", "price": 10, "stock": {"count": 5}},
                    "sort": [10, "a-1"],
                },
                {
                    "_source": {"sku": "b-2", "price": 20, "stock": {"count": 0}},
                    "sort": [20, "b-2"],
                },
            ],
        },
        "aggregations": {"vendor": {"buckets": []}},
    })
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| String::from(*s)).collect()
}

#[test]
fn full_is_identity() {
    let input = response();
    assert_eq!(
        project(input.clone(), ReturnType::Full, &[], "").unwrap(),
        input
    );
}

#[test]
fn data_returns_sources() {
    let shaped = project(response(), ReturnType::Data, &[], "").unwrap();
    assert_eq!(shaped["total"], json!(2));
    assert_eq!(
        shaped["rows"],
        json!([
            {"sku": "a-1", "price": 10, "stock": {"count": 5}},
            {"sku": "b-2", "price": 20, "stock": {"count": 0}},
        ])
    );
    assert_eq!(shaped["facets"], json!({"vendor": {"buckets": []}}));
}

#[test]
fn last_cursor_encodes_trailing_sort() {
    let shaped = project(response(), ReturnType::Data, &[], "").unwrap();
    let last = shaped["last"].as_str().unwrap();
    assert_eq!(cursor::decode(last), Some(json!([20, "b-2"])));
}

#[test]
fn last_is_absent_without_sort_values() {
    let shaped = project(
        json!({"hits": {"total": 1, "hits": [{"_source": {"a": 1}}]}}),
        ReturnType::Data,
        &[],
        "",
    )
    .unwrap();
    assert!(shaped.get("last").is_none());
}

#[test]
fn list_extracts_columns_by_path() {
    let shaped = project(
        response(),
        ReturnType::List,
        &columns(&["sku", "stock.count"]),
        "",
    )
    .unwrap();
    assert_eq!(shaped["columns"], json!(["sku", "stock.count"]));
    assert_eq!(shaped["rows"], json!([["a-1", 5], ["b-2", 0]]));
}

#[test]
fn missing_paths_extract_as_null() {
    let shaped = project(
        response(),
        ReturnType::List,
        &columns(&["sku", "nope.deep"]),
        "",
    )
    .unwrap();
    assert_eq!(shaped["rows"][0], json!(["a-1", null]));
}

#[test]
fn empty_select_discovers_sorted_columns() {
    let shaped = project(
        json!({
            "hits": {
                "total": 1,
                "hits": [{"_source": {"z": 1, "a": 2, "m": 3}}],
            }
        }),
        ReturnType::List,
        &[],
        "",
    )
    .unwrap();
    assert_eq!(shaped["columns"], json!(["a", "m", "z"]));
    assert_eq!(shaped["rows"], json!([[2, 3, 1]]));
}

#[test]
fn multi_element_list_fans_out() {
    let shaped = project(
        json!({
            "hits": {
                "total": 1,
                "hits": [{
                    "_source": {
                        "id": 7,
                        "name": "thing",
                        "state": "ok",
                        "tags": ["a", "b", "c"],
                    },
                }],
            }
        }),
        ReturnType::List,
        &columns(&["id", "name", "state", "tags"]),
        "",
    )
    .unwrap();
    assert_eq!(
        shaped["rows"],
        json!([
            [7, "thing", "ok", "a"],
            [7, "thing", "ok", "b"],
            [7, "thing", "ok", "c"],
        ])
    );
}

#[test]
fn nested_object_lists_fan_out_together() {
    let shaped = project(
        json!({
            "hits": {
                "total": 1,
                "hits": [{
                    "_source": {
                        "id": 1,
                        "addr": [
                            {"city": "rome", "zip": "00100"},
                            {"city": "oslo", "zip": "0150"},
                        ],
                    },
                }],
            }
        }),
        ReturnType::List,
        &columns(&["id", "addr.city", "addr.zip"]),
        "",
    )
    .unwrap();
    assert_eq!(
        shaped["rows"],
        json!([[1, "rome", "00100"], [1, "oslo", "0150"]])
    );
}

#[test]
fn unrelated_lists_fail_the_projection() {
    let err = project(
        json!({
            "hits": {
                "total": 1,
                "hits": [{
                    "_source": {"tags": ["a", "b"], "sizes": [1, 2, 3]},
                }],
            }
        }),
        ReturnType::List,
        &columns(&["tags", "sizes"]),
        "",
    )
    .unwrap_err();
    assert!(matches!(err, ErrorKind::Shape(msg) if msg == "too many nested lists in result"));
}

#[test]
fn single_element_list_unwraps() {
    let shaped = project(
        json!({
            "hits": {
                "total": 1,
                "hits": [{"_source": {"id": 1, "tags": ["only"]}}],
            }
        }),
        ReturnType::List,
        &columns(&["id", "tags"]),
        "",
    )
    .unwrap();
    assert_eq!(shaped["rows"], json!([[1, "only"]]));
}

#[test]
fn string_list_coerces_cells() {
    let shaped = project(
        json!({
            "hits": {
                "total": 1,
                "hits": [{
                    "_source": {
                        "name": "x",
                        "price": 1.5,
                        "meta": {"a": 1},
                        "gone": null,
                    },
                }],
            }
        }),
        ReturnType::StringList,
        &columns(&["name", "price", "meta", "gone", "absent"]),
        "<nil>",
    )
    .unwrap();
    assert_eq!(
        shaped["rows"],
        json!([["x", "1.5", "{\"a\":1}", "<nil>", "<nil>"]])
    );
}

#[test]
fn float_total_is_accepted() {
    let shaped = project(
        json!({"hits": {"total": 2.0, "hits": []}}),
        ReturnType::Data,
        &[],
        "",
    )
    .unwrap();
    assert_eq!(shaped["total"], json!(2));
}

#[test]
fn missing_hits_is_a_shape_error() {
    let err = project(json!({"took": 1}), ReturnType::Data, &[], "").unwrap_err();
    assert!(matches!(err, ErrorKind::Shape(_)));

    let err = project(json!({"hits": {"total": 1}}), ReturnType::Data, &[], "").unwrap_err();
    assert!(matches!(err, ErrorKind::Shape(_)));
}

#[test]
fn list_hit_without_source_is_a_shape_error() {
    let err = project(
        json!({"hits": {"total": 1, "hits": [{"sort": [1]}]}}),
        ReturnType::List,
        &columns(&["a"]),
        "",
    )
    .unwrap_err();
    assert!(matches!(err, ErrorKind::Shape(_)));
}
