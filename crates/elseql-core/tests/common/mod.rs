#![allow(dead_code)]

use elseql_core::{Expression, ParseError, Parser, Query};

pub fn parse(input: &str) -> Query {
    Parser::new(input)
        .parse()
        .unwrap_or_else(|e| panic!("Failed to parse: {input}\nError: {e}"))
}

pub fn parse_err(input: &str) -> ParseError {
    Parser::new(input)
        .parse()
        .expect_err(&format!("Expected parse error for: {input}"))
}

pub fn where_expr(input: &str) -> Expression {
    parse(input)
        .where_expr
        .unwrap_or_else(|| panic!("Query has no WHERE clause: {input}"))
}

/// Renders the WHERE clause of `input` as a Lucene query string.
pub fn lucene(input: &str) -> String {
    where_expr(input).query_string()
}
