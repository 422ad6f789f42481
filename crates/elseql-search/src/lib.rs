//! # elseql-search
//!
//! Lowers parsed ELSEQL queries into the JSON request body of an
//! ElasticSearch-style `_search` endpoint, and shapes the hierarchical
//! JSON response into tabular or nested result forms.
//!
//! This crate provides:
//! - [`translate`]: ELSEQL text (or a raw JSON body) → request body,
//!   index path and column list
//! - [`project`]: backend response → one of four [`ReturnType`] shapes,
//!   with dot-path extraction and nested-array fan-out
//! - [`ElseSearch`]: the full pipeline over a [`Transport`] collaborator
//!
//! ## Quick Start
//!
//! ```
//! use elseql_search::translate;
//!
//! let translated = translate(
//!     r#"SELECT sku, price FROM catalog.v2 WHERE price <= 5"#,
//!     None,
//!     None,
//! )?;
//!
//! assert_eq!(translated.path(), "catalog/v2/_search");
//! assert_eq!(
//!     translated.body["query"]["query_string"]["query"],
//!     "price:[* TO 5]",
//! );
//! # Ok::<(), elseql_search::SearchError>(())
//! ```
//!
//! The HTTP round trip itself is an external concern: implement
//! [`Transport`] over your client of choice and hand it to
//! [`ElseSearch`].

mod client;
mod error;
mod request;
mod response;

pub use client::{ElseSearch, Transport, TransportError};
pub use error::{ErrorKind, Result, SearchError};
pub use request::{translate, translate_query, Translated};
pub use response::{project, ReturnType};
