#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tablescope_query::Row;
use tablescope_session::backends::MemoryServer;
use tablescope_session::{ConnectOptions, Session};

pub const PASSWORD: &str = "secret";

/// A server with one `school` database holding `t_students`.
pub fn school_server() -> MemoryServer {
    MemoryServer::new()
        .with_password(PASSWORD)
        .respond(
            "SHOW DATABASES;",
            vec![
                Row::new().with("Database", "information_schema"),
                Row::new().with("Database", "school"),
            ],
        )
        .respond(
            "SHOW TABLES;",
            vec![
                Row::new().with("Tables_in_school", "t_students"),
                Row::new().with("Tables_in_school", "t_teachers"),
            ],
        )
        .respond(
            "SHOW COLUMNS FROM t_students;",
            vec![
                column_row("ID", "int", "NO", "PRI", None, "auto_increment"),
                column_row("Name", "varchar(64)", "YES", "", Some("anon"), ""),
            ],
        )
        .respond(
            "SELECT * FROM t_students;",
            vec![
                Row::new().with("ID", 1_i64).with("Name", "Alice"),
                Row::new().with("ID", 2_i64).with("Name", "Bob"),
            ],
        )
        .fail("SELECT * FROM missing;", "Table 'school.missing' doesn't exist")
}

pub fn column_row(
    field: &str,
    ty: &str,
    null: &str,
    key: &str,
    default: Option<&str>,
    extra: &str,
) -> Row {
    Row::new()
        .with("Field", field)
        .with("Type", ty)
        .with("Null", null)
        .with("Key", key)
        .with("Default", default)
        .with("Extra", extra)
}

pub fn options() -> ConnectOptions {
    ConnectOptions::new().password(PASSWORD)
}

/// A session on `server` whose observed statements land in the returned log.
pub fn observed_session(server: &MemoryServer) -> (Session, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let mut session = Session::new(Arc::new(server.clone()));
    session.set_observer(move |sql| sink.lock().unwrap().push(sql.to_string()));
    (session, log)
}
