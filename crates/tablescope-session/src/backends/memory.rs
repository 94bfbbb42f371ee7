//! Scripted in-memory backend.
//!
//! A [`MemoryServer`] answers statements from a table of canned results,
//! records every statement it receives and can be told to refuse
//! connections or fail specific statements. Clones share state, so a test
//! can keep one handle while a session drives another.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tablescope_query::Row;

use crate::client::{ConnectOptions, Connector, DbClient};

#[derive(Debug, Default)]
struct ServerState {
    password: Option<String>,
    unreachable: bool,
    fail_close: bool,
    responses: HashMap<String, Vec<Row>>,
    failures: HashMap<String, String>,
    executed: Vec<String>,
    open_connections: usize,
}

/// An in-memory stand-in for a MySQL server.
#[derive(Debug, Clone, Default)]
pub struct MemoryServer {
    state: Arc<Mutex<ServerState>>,
}

impl MemoryServer {
    /// Creates a server that accepts any credentials and answers every
    /// statement with no rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ServerState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Requires `password` on connect.
    #[must_use]
    pub fn with_password(self, password: impl Into<String>) -> Self {
        self.lock().password = Some(password.into());
        self
    }

    /// Answers `sql` with `rows`.
    #[must_use]
    pub fn respond(self, sql: impl Into<String>, rows: Vec<Row>) -> Self {
        self.lock().responses.insert(sql.into(), rows);
        self
    }

    /// Fails `sql` with a protocol error carrying `message`.
    #[must_use]
    pub fn fail(self, sql: impl Into<String>, message: impl Into<String>) -> Self {
        self.lock().failures.insert(sql.into(), message.into());
        self
    }

    /// Refuses every connection attempt.
    #[must_use]
    pub fn unreachable(self) -> Self {
        self.lock().unreachable = true;
        self
    }

    /// Reports an error when a connection is ended.
    #[must_use]
    pub fn fail_on_close(self) -> Self {
        self.lock().fail_close = true;
        self
    }

    /// Statements received so far, in order.
    #[must_use]
    pub fn executed(&self) -> Vec<String> {
        self.lock().executed.clone()
    }

    /// Number of connections not yet closed.
    #[must_use]
    pub fn open_connections(&self) -> usize {
        self.lock().open_connections
    }
}

#[async_trait]
impl Connector for MemoryServer {
    async fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn DbClient>, sqlx::Error> {
        let mut state = self.lock();
        if state.unreachable {
            return Err(sqlx::Error::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("connection refused: {}:{}", options.host, options.port),
            )));
        }
        if let Some(expected) = &state.password {
            if expected != &options.password {
                return Err(sqlx::Error::Protocol(format!(
                    "Access denied for user '{}'@'{}'",
                    options.user, options.host
                )));
            }
        }
        state.open_connections += 1;
        drop(state);

        Ok(Box::new(MemoryClient {
            server: self.clone(),
            open: true,
        }))
    }
}

/// A connection to a [`MemoryServer`].
#[derive(Debug)]
pub struct MemoryClient {
    server: MemoryServer,
    open: bool,
}

#[async_trait]
impl DbClient for MemoryClient {
    async fn query(&mut self, sql: &str) -> Result<Vec<Row>, sqlx::Error> {
        if !self.open {
            return Err(sqlx::Error::Protocol(String::from(
                "connection already closed",
            )));
        }
        let mut state = self.server.lock();
        state.executed.push(String::from(sql));
        if let Some(message) = state.failures.get(sql) {
            return Err(sqlx::Error::Protocol(message.clone()));
        }
        Ok(state.responses.get(sql).cloned().unwrap_or_default())
    }

    async fn close(&mut self) -> Result<(), sqlx::Error> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        let mut state = self.server.lock();
        state.open_connections -= 1;
        if state.fail_close {
            return Err(sqlx::Error::Protocol(String::from(
                "connection reset while closing",
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablescope_query::Value;

    #[tokio::test]
    async fn test_canned_response() {
        let server =
            MemoryServer::new().respond("SELECT 1;", vec![Row::new().with("1", 1_i64)]);
        let mut client = server.connect(&ConnectOptions::new()).await.unwrap();

        let rows = client.query("SELECT 1;").await.unwrap();
        assert_eq!(rows[0].first(), Some(&Value::Int(1)));
        assert!(client.query("SELECT 2;").await.unwrap().is_empty());
        assert_eq!(server.executed(), vec!["SELECT 1;", "SELECT 2;"]);
    }

    #[tokio::test]
    async fn test_password_check() {
        let server = MemoryServer::new().with_password("secret");
        assert!(server.connect(&ConnectOptions::new()).await.is_err());
        assert!(server
            .connect(&ConnectOptions::new().password("secret"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_close_tracks_connections() {
        let server = MemoryServer::new();
        let mut client = server.connect(&ConnectOptions::new()).await.unwrap();
        assert_eq!(server.open_connections(), 1);
        client.close().await.unwrap();
        assert_eq!(server.open_connections(), 0);
        assert!(client.query("SELECT 1;").await.is_err());
    }
}
