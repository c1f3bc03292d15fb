//! JSON output formatting
//!
//! Results go to stdout pretty-printed; errors go to stderr on one line.

use serde::Serialize;

/// Pretty-printed JSON for a command result
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|e| {
        format!(
            r#"{{"error": true, "code": "SERIALIZATION_ERROR", "message": "{}"}}"#,
            e
        )
    })
}

/// Single-line JSON, used for the error object `edrex` prints on stderr
pub fn format_json_compact<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| {
        format!(
            r#"{{"error":true,"code":"SERIALIZATION_ERROR","message":"{}"}}"#,
            e
        )
    })
}
