#![allow(dead_code)]

use std::sync::Arc;

use tablescope_bridge::Bridge;
use tablescope_browser::Browser;
use tablescope_query::Row;
use tablescope_session::backends::MemoryServer;
use tablescope_session::ConnectOptions;

pub fn column_row(field: &str, ty: &str) -> Row {
    Row::new()
        .with("Field", field)
        .with("Type", ty)
        .with("Null", "YES")
        .with("Key", "")
        .with("Default", None::<String>)
        .with("Extra", "")
}

/// A server with one `school` database holding `t_students`.
pub fn school_server() -> MemoryServer {
    MemoryServer::new()
        .respond(
            "SHOW DATABASES;",
            vec![Row::new().with("Database", "school")],
        )
        .respond(
            "SHOW TABLES;",
            vec![Row::new().with("Tables_in_school", "t_students")],
        )
        .respond(
            "SHOW COLUMNS FROM t_students;",
            vec![
                column_row("ID", "int(11)"),
                column_row("Name", "varchar(64)"),
                column_row("Age", "tinyint(3) unsigned"),
            ],
        )
        .respond(
            "SELECT * FROM t_students;",
            vec![
                Row::new().with("ID", 1_i64).with("Name", "Alice").with("Age", 22_i64),
                Row::new().with("ID", 2_i64).with("Name", "Bob").with("Age", 19_i64),
            ],
        )
        .respond(
            "SELECT * FROM t_students WHERE Age >= 20 AND Name LIKE 'A%' ORDER BY ID DESC;",
            vec![Row::new().with("ID", 1_i64).with("Name", "Alice").with("Age", 22_i64)],
        )
}

pub fn browser(server: &MemoryServer) -> Browser {
    Browser::new(Bridge::new(Arc::new(server.clone())))
}

/// A browser connected to `server` with `t_students` open.
pub async fn open_students(server: &MemoryServer) -> Browser {
    let mut browser = browser(server);
    browser.connect(ConnectOptions::new()).await.unwrap();
    assert!(browser.select_database("school").await.unwrap());
    browser.select_table("t_students").await.unwrap();
    browser
}
