//! ELSEQL Parser
//!
//! A hand-written recursive descent parser with one token of lookahead.
//!
//! # Grammar
//!
//! Keywords are case-insensitive; identifiers are case-sensitive.
//!
//! ```text
//! query    = "SELECT" select_list ["FACETS" id_list] ["SCRIPT" script]
//!            "FROM" ident
//!            ["WHERE" expr] ["FILTER" filter]
//!            ["ORDER" "BY" order_list]
//!            ["LIMIT" int ["," int]]
//!            ["AFTER" string] EOF
//! select_list = "*" | id_list
//! id_list  = ident ("," ident)*
//! ident    = seg ("." seg)*
//! script   = seg "=" string
//! expr     = term (("AND"|"OR") term)*
//! term     = ["NOT"] atom
//! atom     = string
//!          | "EXIST" ident
//!          | ident op value
//!          | ident "IN" "(" value ("," value)* ")"
//! op       = "=" | "!=" | "<" | "<=" | ">" | ">="
//! filter   = "EXIST" ident | "MISSING" ident | expr
//! order_list = string | (ident ["ASC"|"DESC"]) ("," …)*
//! ```
//!
//! The first segment of an identifier may not be a reserved word, but
//! segments after a dot may — `body.desc` is a valid path.
//!
//! `AND` and `OR` share one precedence level and fold left to right
//! into n-ary nodes; `NOT` binds tighter. An `ORDER BY` clause whose
//! first token is a quoted string is decoded (base64url and/or JSON)
//! into a single script sort entry.

mod core;
mod error;
mod keyword;

pub use core::Parser;
pub use error::ParseError;
pub use keyword::Keyword;
