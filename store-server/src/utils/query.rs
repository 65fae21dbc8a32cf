//! Query string helpers
//!
//! Values are percent-decoded the same way axum's `Query` extractor does.
//! A repeated key keeps its first value.

use std::collections::HashMap;

/// First value of every key in a URL-encoded query string
pub fn first_values(query: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        values
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    values
}

/// First value of `key`, percent-decoded
pub fn first_value(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
