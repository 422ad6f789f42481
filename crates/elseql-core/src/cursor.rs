//! Opaque pagination cursors: base64url (no padding) over JSON.
//!
//! A cursor carries the `sort` values of the last hit of a page so the
//! next request can resume after it. The token is opaque to callers;
//! [`decode`] also accepts plain JSON for hand-built cursors.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

/// Encodes a JSON value as an opaque cursor token.
#[must_use]
pub fn encode(value: &Value) -> String {
    URL_SAFE_NO_PAD.encode(value.to_string())
}

/// Decodes a cursor token back into its JSON value.
///
/// The token is first treated as base64url without padding; when that
/// fails, the input is taken to be JSON already. Returns `None` when
/// the final JSON decode fails.
#[must_use]
pub fn decode(token: &str) -> Option<Value> {
    let json = match URL_SAFE_NO_PAD.decode(token) {
        Ok(bytes) => String::from_utf8(bytes).ok()?,
        Err(_) => String::from(token),
    };

    serde_json::from_str(&json).ok()
}
