#![allow(dead_code)]

use std::sync::Arc;

use tablescope_bridge::{Bridge, Notification};
use tablescope_query::Row;
use tablescope_session::backends::MemoryServer;
use tokio::sync::broadcast;

pub const OPEN: &str = r#"{"method":"open","params":{"user":"root","password":"secret"}}"#;

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
            "SELECT ID, Name FROM t_students WHERE ID = 1;",
            vec![Row::new().with("ID", 1_i64).with("Name", "Alice")],
        )
        .fail("SELECT * FROM missing;", "Table 'school.missing' doesn't exist")
}

pub fn bridge(server: &MemoryServer) -> Bridge {
    Bridge::new(Arc::new(server.clone()))
}

/// Drains every notification received so far into statements.
pub fn statements(rx: &mut broadcast::Receiver<Notification>) -> Vec<String> {
    let mut out = Vec::new();
    while let Ok(Notification::Sql { statement }) = rx.try_recv() {
        out.push(statement);
    }
    out
}
