//! The bridge: one owned session behind named endpoints.

use std::fmt;
use std::sync::Arc;

use tablescope_query::{ColumnInfo, QuerySpec, Row};
use tablescope_session::backends::MySqlConnector;
use tablescope_session::{
    CloseOutcome, ConnectOptions, Connector, QueryError, Session, SessionState,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::error::{BridgeError, Result};
use crate::request::{Request, ENDPOINTS};
use crate::response::{Notification, Payload, Response};

/// Capacity of the notification channel. Slow subscribers lag past this.
pub const NOTIFICATION_BUFFER_SIZE: usize = 256;

/// Exposes a session as request/response endpoints plus a push channel.
///
/// The session is held behind an async mutex for the whole duration of a
/// call, so at most one statement is in flight at a time. Before `open`
/// succeeds, endpoints answer with `false` or an empty list.
pub struct Bridge {
    connector: Arc<dyn Connector>,
    session: Mutex<Option<Session>>,
    notifications: broadcast::Sender<Notification>,
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("subscribers", &self.notifications.receiver_count())
            .finish_non_exhaustive()
    }
}

impl Bridge {
    /// Creates a bridge whose sessions connect through `connector`.
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        let (notifications, _) = broadcast::channel(NOTIFICATION_BUFFER_SIZE);
        Self {
            connector,
            session: Mutex::new(None),
            notifications,
        }
    }

    /// Creates a bridge that talks to MySQL.
    pub fn mysql() -> Self {
        Self::new(Arc::new(MySqlConnector::new()))
    }

    /// Returns the endpoint names.
    pub const fn endpoints() -> &'static [&'static str] {
        ENDPOINTS
    }

    /// Subscribes to `sql` notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    /// Returns the state of the current session.
    pub async fn state(&self) -> SessionState {
        self.session
            .lock()
            .await
            .as_ref()
            .map_or(SessionState::Disconnected, Session::state)
    }

    /// `open`: connects a fresh session, replacing any existing one.
    ///
    /// Returns `true` once connected. A connect failure is an error and
    /// leaves no session behind.
    pub async fn open(&self, options: ConnectOptions) -> Result<bool> {
        let mut guard = self.session.lock().await;

        if let Some(mut previous) = guard.take() {
            if let Err(e) = previous.close().await {
                warn!(error = %e, "Failed to close replaced session");
            }
        }

        let mut session = Session::new(Arc::clone(&self.connector));
        let sender = self.notifications.clone();
        session.set_observer(move |sql| {
            // Nobody listening is fine.
            let _ = sender.send(Notification::Sql {
                statement: String::from(sql),
            });
        });

        session.connect(&options).await?;
        *guard = Some(session);
        info!(host = %options.host, port = options.port, "Bridge session opened");
        Ok(true)
    }

    /// `close`: releases the session. Returns `false` when there was none.
    pub async fn close(&self) -> Result<bool> {
        let mut guard = self.session.lock().await;
        let Some(mut session) = guard.take() else {
            return Ok(false);
        };
        let outcome = session.close().await?;
        Ok(outcome == CloseOutcome::Closed)
    }

    /// `selectDatabase`
    pub async fn select_database(&self, database: &str) -> Result<bool> {
        let mut guard = self.session.lock().await;
        let Some(session) = guard.as_mut() else {
            return Ok(false);
        };
        neutral(session.select_database(database).await.map(|()| true))
    }

    /// `fetchDatabases`
    pub async fn fetch_databases(&self) -> Result<Vec<String>> {
        let mut guard = self.session.lock().await;
        let Some(session) = guard.as_mut() else {
            return Ok(Vec::new());
        };
        neutral(session.list_databases().await)
    }

    /// `fetchTables`
    pub async fn fetch_tables(&self) -> Result<Vec<String>> {
        let mut guard = self.session.lock().await;
        let Some(session) = guard.as_mut() else {
            return Ok(Vec::new());
        };
        neutral(session.list_tables().await)
    }

    /// `fetchColumns`
    pub async fn fetch_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let mut guard = self.session.lock().await;
        let Some(session) = guard.as_mut() else {
            return Ok(Vec::new());
        };
        neutral(session.describe_table(table).await)
    }

    /// `query`
    pub async fn query(&self, spec: QuerySpec) -> Result<Vec<Row>> {
        let mut guard = self.session.lock().await;
        let Some(session) = guard.as_mut() else {
            return Ok(Vec::new());
        };
        neutral(session.run_query(spec).await)
    }

    /// Runs one request and wraps the outcome.
    pub async fn dispatch(&self, request: Request) -> Response {
        let endpoint = request.endpoint();
        debug!(endpoint, "Dispatching request");

        let result = match request {
            Request::Open(options) => self.open(options).await.map(Payload::Bool),
            Request::Close => self.close().await.map(Payload::Bool),
            Request::SelectDatabase { database } => {
                self.select_database(&database).await.map(Payload::Bool)
            }
            Request::FetchDatabases => self.fetch_databases().await.map(Payload::Names),
            Request::FetchTables => self.fetch_tables().await.map(Payload::Names),
            Request::FetchColumns { table } => {
                self.fetch_columns(&table).await.map(Payload::Columns)
            }
            Request::Query(spec) => self.query(spec).await.map(Payload::Rows),
        };

        match result {
            Ok(payload) => Response::Ok(payload),
            Err(e) => {
                warn!(endpoint, error = %e, "Request failed");
                Response::error(e.to_string())
            }
        }
    }

    /// Decodes one JSON request, runs it and encodes the response.
    pub async fn handle_json(&self, line: &str) -> String {
        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => {
                warn!(error = %e, "Malformed request");
                Response::error(BridgeError::from(e).to_string())
            }
        };
        response.to_json()
    }
}

/// Turns state-precondition failures into the endpoint's neutral value.
fn neutral<T: Default>(result: std::result::Result<T, QueryError>) -> Result<T> {
    match result {
        Err(QueryError::NotConnected | QueryError::NoDatabaseSelected) => Ok(T::default()),
        other => other.map_err(BridgeError::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablescope_session::backends::MemoryServer;

    fn bridge(server: &MemoryServer) -> Bridge {
        Bridge::new(Arc::new(server.clone()))
    }

    #[tokio::test]
    async fn test_defaults_before_open() {
        let server = MemoryServer::new();
        let bridge = bridge(&server);

        assert!(!bridge.close().await.unwrap());
        assert!(!bridge.select_database("school").await.unwrap());
        assert!(bridge.fetch_databases().await.unwrap().is_empty());
        assert!(bridge.fetch_tables().await.unwrap().is_empty());
        assert!(bridge.fetch_columns("t").await.unwrap().is_empty());
        assert!(bridge.query(QuerySpec::new("t")).await.unwrap().is_empty());
        assert!(server.executed().is_empty());
    }

    #[tokio::test]
    async fn test_tables_before_use_is_empty() {
        let server = MemoryServer::new();
        let bridge = bridge(&server);
        assert!(bridge.open(ConnectOptions::new()).await.unwrap());

        assert!(bridge.fetch_tables().await.unwrap().is_empty());
        assert!(server.executed().is_empty());
    }

    #[tokio::test]
    async fn test_open_replaces_session() {
        let server = MemoryServer::new();
        let bridge = bridge(&server);

        assert!(bridge.open(ConnectOptions::new()).await.unwrap());
        assert!(bridge.select_database("school").await.unwrap());
        assert!(bridge.open(ConnectOptions::new()).await.unwrap());

        assert_eq!(server.open_connections(), 1);
        assert_eq!(bridge.state().await, SessionState::Connected);
    }

    #[tokio::test]
    async fn test_failed_open_leaves_no_session() {
        let server = MemoryServer::new().with_password("secret");
        let bridge = bridge(&server);

        assert!(bridge.open(ConnectOptions::new()).await.is_err());
        assert_eq!(bridge.state().await, SessionState::Disconnected);
        assert!(!bridge.close().await.unwrap());
    }

    #[test]
    fn test_neutral_keeps_driver_errors() {
        let err = sqlx::Error::Protocol(String::from("boom"));
        let result: Result<Vec<String>> = neutral(Err(QueryError::Driver(err)));
        assert!(matches!(result, Err(BridgeError::Query(QueryError::Driver(_)))));

        let result: Result<bool> = neutral(Err(QueryError::NotConnected));
        assert!(!result.unwrap());
    }
}
