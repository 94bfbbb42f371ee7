//! Loading query specs from files or stdin.

use std::io::Read;
use std::path::Path;
use std::{fs, io};

use anyhow::Context;
use tablescope_query::QuerySpec;

/// Parses a JSON query spec.
pub fn parse_spec(json: &str) -> anyhow::Result<QuerySpec> {
    serde_json::from_str(json).context("invalid query spec")
}

/// Reads a spec from `path`; `-` reads stdin.
pub fn read_spec(path: &Path) -> anyhow::Result<QuerySpec> {
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read spec from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read spec file {}", path.display()))?
    };
    parse_spec(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spec() {
        let spec = parse_spec(r#"{"table":"t_students","columns":["ID"]}"#).unwrap();
        assert_eq!(spec.to_sql(), "SELECT ID FROM t_students;");
    }

    #[test]
    fn test_parse_spec_rejects_ambiguous_condition() {
        let err = parse_spec(
            r#"{"table":"t","conditions":[{"field":"a","exact":1,"range":{"start":{"value":1}}}]}"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("more than one"));
    }
}
