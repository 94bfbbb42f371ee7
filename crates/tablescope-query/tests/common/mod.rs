#![allow(dead_code)]

use tablescope_query::{compile, QuerySpec};

/// Decodes a JSON query spec, panicking with the input on failure.
pub fn spec(json: &str) -> QuerySpec {
    serde_json::from_str(json).unwrap_or_else(|e| panic!("Failed to decode: {json}\nError: {e}"))
}

/// Decodes and compiles a JSON query spec.
pub fn compile_json(json: &str) -> String {
    compile(&spec(json))
}

/// Asserts that `sql` contains `fragment`.
pub fn assert_contains(sql: &str, fragment: &str) {
    assert!(
        sql.contains(fragment),
        "Expected fragment not found.\n  SQL:      {sql}\n  Fragment: {fragment}"
    );
}
