#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tablescope_cli::{commands, Cli};
use tablescope_query::Row;
use tablescope_session::backends::MemoryServer;
use tempfile::NamedTempFile;

/// A server with one `school` database holding `t_students`.
pub fn school_server() -> MemoryServer {
    MemoryServer::new()
        .with_password("secret")
        .respond(
            "SHOW DATABASES;",
            vec![
                Row::new().with("Database", "information_schema"),
                Row::new().with("Database", "school"),
            ],
        )
        .respond(
            "SHOW TABLES;",
            vec![Row::new().with("Tables_in_school", "t_students")],
        )
        .respond(
            "SHOW COLUMNS FROM t_students;",
            vec![Row::new()
                .with("Field", "ID")
                .with("Type", "int(11)")
                .with("Null", "NO")
                .with("Key", "PRI")
                .with("Default", None::<String>)
                .with("Extra", "auto_increment")],
        )
        .respond(
            "SELECT ID, Name FROM t_students WHERE Name LIKE 'A%';",
            vec![Row::new().with("ID", 1_i64).with("Name", "Alice")],
        )
}

/// Writes `json` to a temporary spec file.
pub fn spec_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

/// Parses `args` (without the binary name) and runs the command against
/// `server`, returning what it printed.
pub async fn run(server: &MemoryServer, args: &[&str]) -> anyhow::Result<String> {
    run_as(server, "secret", args).await
}

pub async fn run_as(server: &MemoryServer, password: &str, args: &[&str]) -> anyhow::Result<String> {
    let prefix = ["tablescope", "--password", password];
    let argv = prefix
        .iter()
        .chain(args)
        .copied();
    let cli = Cli::try_parse_from(argv)?;
    let mut out = Vec::new();
    commands::run(&cli, Arc::new(server.clone()), &mut out).await?;
    Ok(String::from_utf8(out)?)
}
