//! # elseql-core
//!
//! The ELSEQL query language: a SQL-like front end for document search
//! engines.
//!
//! This crate provides:
//! - A hand-written scanner producing a lazy token stream
//! - A recursive descent parser building an immutable [`Query`] AST
//! - Expression trees with a Lucene query-string rendering
//! - The opaque cursor codec (base64url of JSON) used for pagination
//!
//! ## Quick Start
//!
//! ```
//! use elseql_core::Parser;
//!
//! let query = Parser::new(
//!     "SELECT sku, price FROM catalog WHERE price > 10 ORDER BY price DESC LIMIT 25",
//! )
//! .parse()?;
//!
//! assert_eq!(query.index, "catalog");
//! assert_eq!(query.select_list, vec!["sku", "price"]);
//! assert_eq!(query.size, 25);
//! assert_eq!(
//!     query.where_expr.unwrap().query_string(),
//!     "price:{10 TO *}",
//! );
//! # Ok::<(), elseql_core::ParseError>(())
//! ```
//!
//! Translating the AST into a backend request body lives in the
//! `elseql-search` crate; this crate performs no I/O.

pub mod ast;
pub mod cursor;
pub mod lexer;
pub mod parser;

pub use ast::{CompareOp, Expression, NameValue, Query};
pub use lexer::{Lexer, Token};
pub use parser::{Keyword, ParseError, Parser};
