//! Connection lifecycle and schema introspection.
//!
//! A [`Session`] owns at most one client handle and moves between
//! [`SessionState::Disconnected`], [`SessionState::Connected`] and
//! [`SessionState::DatabaseSelected`]. Every statement it issues is handed
//! to the registered observer before it runs.

use std::fmt;
use std::sync::Arc;

use tablescope_query::{compile, statement, ColumnInfo, QuerySpec, Row, Value};
use tracing::{debug, info, warn};

use crate::client::{ConnectOptions, Connector, DbClient};
use crate::error::{CloseError, ConnectError, QueryError};

/// Callback receiving each SQL statement before it is executed.
pub type SqlObserver = Box<dyn Fn(&str) + Send + Sync>;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No connection.
    Disconnected,
    /// Connected, no database selected.
    Connected,
    /// Connected with a current database.
    DatabaseSelected(String),
}

/// Result of [`Session::close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// A connection was released.
    Closed,
    /// The session was already disconnected.
    NothingToClose,
}

/// A statement to run: a structured spec or raw SQL.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryInput {
    /// Compiled before execution.
    Spec(QuerySpec),
    /// Executed as given.
    Raw(String),
}

impl QueryInput {
    /// Returns the SQL this input executes.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Spec(spec) => compile(spec),
            Self::Raw(sql) => sql.clone(),
        }
    }
}

impl From<QuerySpec> for QueryInput {
    fn from(spec: QuerySpec) -> Self {
        Self::Spec(spec)
    }
}

impl From<String> for QueryInput {
    fn from(sql: String) -> Self {
        Self::Raw(sql)
    }
}

impl From<&str> for QueryInput {
    fn from(sql: &str) -> Self {
        Self::Raw(String::from(sql))
    }
}

/// A stateful wrapper around one database connection.
pub struct Session {
    connector: Arc<dyn Connector>,
    client: Option<Box<dyn DbClient>>,
    database: Option<String>,
    observer: Option<SqlObserver>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a disconnected session that opens connections through
    /// `connector`.
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            client: None,
            database: None,
            observer: None,
        }
    }

    /// Registers the statement observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl Fn(&str) + Send + Sync + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> SessionState {
        match (&self.client, &self.database) {
            (None, _) => SessionState::Disconnected,
            (Some(_), None) => SessionState::Connected,
            (Some(_), Some(name)) => SessionState::DatabaseSelected(name.clone()),
        }
    }

    /// Returns true unless disconnected.
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Returns the selected database, if any.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Opens the connection.
    ///
    /// On failure the half-open handle is discarded and the session stays
    /// disconnected.
    pub async fn connect(&mut self, options: &ConnectOptions) -> Result<(), ConnectError> {
        if self.client.is_some() {
            return Err(ConnectError::AlreadyConnected);
        }

        debug!(host = %options.host, port = options.port, user = %options.user, "Connecting");
        let client = self.connector.connect(options).await.map_err(|e| {
            warn!(host = %options.host, port = options.port, error = %e, "Connection failed");
            ConnectError::from(e)
        })?;

        self.client = Some(client);
        self.database = None;
        info!(host = %options.host, port = options.port, "Session connected");
        Ok(())
    }

    /// Switches the current database with `USE`.
    pub async fn select_database(&mut self, name: &str) -> Result<(), QueryError> {
        self.execute(&statement::use_database(name)).await?;
        self.database = Some(String::from(name));
        info!(database = %name, "Database selected");
        Ok(())
    }

    /// Releases the connection.
    ///
    /// The session is disconnected afterwards even when the driver reports
    /// an error while ending the connection.
    pub async fn close(&mut self) -> Result<CloseOutcome, CloseError> {
        let Some(mut client) = self.client.take() else {
            debug!("Close requested on a disconnected session");
            return Ok(CloseOutcome::NothingToClose);
        };
        self.database = None;

        client.close().await.map_err(|e| {
            warn!(error = %e, "Error while closing connection");
            CloseError::from(e)
        })?;
        info!("Session closed");
        Ok(CloseOutcome::Closed)
    }

    /// Lists databases visible to the connected user.
    pub async fn list_databases(&mut self) -> Result<Vec<String>, QueryError> {
        let rows = self.execute(&statement::show_databases()).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get("Database").or_else(|| row.first()))
            .filter_map(Value::to_text)
            .collect())
    }

    /// Lists tables of the selected database.
    pub async fn list_tables(&mut self) -> Result<Vec<String>, QueryError> {
        self.require_database()?;
        let rows = self.execute(&statement::show_tables()).await?;
        Ok(rows
            .iter()
            .filter_map(Row::first)
            .filter_map(Value::to_text)
            .collect())
    }

    /// Describes the columns of `table`.
    pub async fn describe_table(&mut self, table: &str) -> Result<Vec<ColumnInfo>, QueryError> {
        let rows = self.execute(&statement::show_columns(table)).await?;
        rows.iter().map(column_from_row).collect()
    }

    /// Runs a structured spec or raw SQL and returns the rows in server
    /// order.
    pub async fn run_query(&mut self, input: impl Into<QueryInput>) -> Result<Vec<Row>, QueryError> {
        let sql = input.into().to_sql();
        self.execute(&sql).await
    }

    fn require_database(&self) -> Result<(), QueryError> {
        match self.state() {
            SessionState::Disconnected => Err(QueryError::NotConnected),
            SessionState::Connected => Err(QueryError::NoDatabaseSelected),
            SessionState::DatabaseSelected(_) => Ok(()),
        }
    }

    async fn execute(&mut self, sql: &str) -> Result<Vec<Row>, QueryError> {
        let client = self.client.as_mut().ok_or(QueryError::NotConnected)?;

        if let Some(observer) = &self.observer {
            observer(sql);
        }

        debug!(sql = %sql, "Executing SQL");
        match client.query(sql).await {
            Ok(rows) => {
                debug!(sql = %sql, rows = rows.len(), "Statement finished");
                Ok(rows)
            }
            Err(e) => {
                warn!(sql = %sql, error = %e, "Statement failed");
                Err(QueryError::from(e))
            }
        }
    }
}

/// Maps one `SHOW COLUMNS` row.
fn column_from_row(row: &Row) -> Result<ColumnInfo, QueryError> {
    let text = |column: &str| row.get(column).and_then(Value::to_text);

    let name = text("Field")
        .ok_or_else(|| QueryError::UnexpectedShape(String::from("column row without `Field`")))?;

    Ok(ColumnInfo {
        name,
        column_type: text("Type").unwrap_or_default(),
        nullable: text("Null").is_some_and(|v| v.eq_ignore_ascii_case("yes")),
        primary: text("Key").is_some_and(|v| v == "PRI"),
        default: text("Default"),
        extra: text("Extra").unwrap_or_default(),
    })
}
