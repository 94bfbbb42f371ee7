//! Introspection statements issued by a session.
//!
//! Names are interpolated verbatim, like the identifiers of a
//! [`QuerySpec`](crate::QuerySpec).

/// `USE <database>;`
#[must_use]
pub fn use_database(database: &str) -> String {
    format!("USE {database};")
}

/// `SHOW DATABASES;`
#[must_use]
pub fn show_databases() -> String {
    String::from("SHOW DATABASES;")
}

/// `SHOW TABLES;`
#[must_use]
pub fn show_tables() -> String {
    String::from("SHOW TABLES;")
}

/// `SHOW COLUMNS FROM <table>;`
#[must_use]
pub fn show_columns(table: &str) -> String {
    format!("SHOW COLUMNS FROM {table};")
}
