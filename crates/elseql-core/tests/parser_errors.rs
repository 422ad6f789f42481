//! Tests for parse failures: required keywords, malformed clauses,
//! and the "Expected X, got Y" message format.

mod common;
use common::*;

#[test]
fn missing_select() {
    let err = parse_err("FROM t");
    assert_eq!(err.to_string(), "Expected SELECT, got FROM");
}

#[test]
fn missing_from() {
    let err = parse_err("SELECT *");
    assert_eq!(err.to_string(), "Expected FROM, got EOL");
}

#[test]
fn missing_from_with_trailing_clause() {
    let err = parse_err("SELECT a, b WHERE x = 1");
    assert_eq!(err.to_string(), "Expected FROM, got WHERE");
}

#[test]
fn empty_input() {
    let err = parse_err("");
    assert_eq!(err.to_string(), "Expected SELECT, got EOL");
}

#[test]
fn number_in_select_list() {
    let err = parse_err("SELECT 5 FROM t");
    assert_eq!(err.to_string(), "Expected identifier, got number 5");
}

#[test]
fn dangling_dot_in_path() {
    let err = parse_err("SELECT user., x FROM t");
    assert_eq!(err.to_string(), "Expected identifier, got ,");

    let err = parse_err("SELECT user.");
    assert_eq!(err.to_string(), "Expected identifier, got EOL");
}

#[test]
fn missing_where_expression() {
    let err = parse_err("SELECT * FROM t WHERE");
    assert_eq!(err.to_string(), "Expected expression, got EOL");
}

#[test]
fn dangling_boolean_operator() {
    let err = parse_err("SELECT * FROM t WHERE a = 1 OR");
    assert_eq!(err.to_string(), "Expected expression, got EOL");
}

#[test]
fn bad_comparison_operator() {
    let err = parse_err("SELECT * FROM t WHERE a ~ 1");
    assert_eq!(err.to_string(), "Expected operator, got ~");
}

#[test]
fn bang_without_equals() {
    let err = parse_err("SELECT * FROM t WHERE a ! 1");
    assert_eq!(err.to_string(), "Expected \"=\", got number 1");
}

#[test]
fn missing_comparison_value() {
    let err = parse_err("SELECT * FROM t WHERE a =");
    assert_eq!(err.to_string(), "Expected value, got EOL");
}

#[test]
fn in_requires_parentheses() {
    let err = parse_err(r#"SELECT * FROM t WHERE k IN "a", "b""#);
    assert_eq!(err.to_string(), "Expected \"(\", got \"a\"");
}

#[test]
fn unterminated_in_list() {
    let err = parse_err(r#"SELECT * FROM t WHERE k IN ("a", "b""#);
    assert_eq!(err.to_string(), "Expected \")\", got EOL");
}

#[test]
fn order_without_by() {
    let err = parse_err("SELECT * FROM t ORDER name");
    assert_eq!(err.to_string(), "Expected BY, got name");
}

#[test]
fn limit_requires_integer() {
    let err = parse_err("SELECT * FROM t LIMIT ten");
    assert_eq!(err.to_string(), "Expected integer, got ten");
}

#[test]
fn after_requires_string() {
    let err = parse_err("SELECT * FROM t AFTER cursor");
    assert_eq!(err.to_string(), "Expected quoted string, got cursor");
}

#[test]
fn script_requires_assignment() {
    let err = parse_err(r#"SELECT * SCRIPT total "doc.value" FROM t"#);
    assert_eq!(err.to_string(), "Expected \"=\", got \"doc.value\"");
}

#[test]
fn trailing_token() {
    let err = parse_err("SELECT * FROM t LIMIT 5 extra");
    assert_eq!(err.to_string(), "Expected EOF, got extra");
}

#[test]
fn unterminated_string_literal() {
    let err = parse_err(r#"SELECT * FROM t WHERE x = "abc"#);
    assert_eq!(err.to_string(), "Unterminated string literal");
}
