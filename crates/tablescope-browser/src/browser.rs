//! The browsing controller.

use tablescope_bridge::{Bridge, Notification};
use tablescope_query::{ConditionSpec, OrderSpec, QuerySpec, Row};
use tablescope_session::ConnectOptions;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::error::{BrowserError, Result};
use crate::filter::FilterDraft;
use crate::state::{StatementLog, TableState};

/// Drives a [`Bridge`] the way the desktop client does: pick a database,
/// pick a table, stack filters, load rows, and echo every statement.
///
/// Filter and order changes only edit state; call
/// [`refresh_data`](Self::refresh_data) to reload rows.
#[derive(Debug)]
pub struct Browser {
    bridge: Bridge,
    notifications: broadcast::Receiver<Notification>,
    databases: Vec<String>,
    tables: Vec<String>,
    database: Option<String>,
    table: Option<String>,
    filters: Vec<ConditionSpec>,
    order: Vec<OrderSpec>,
    table_state: TableState,
    statements: StatementLog,
}

impl Browser {
    /// Creates a controller over `bridge` and subscribes to its statements.
    pub fn new(bridge: Bridge) -> Self {
        let notifications = bridge.subscribe();
        Self {
            bridge,
            notifications,
            databases: Vec::new(),
            tables: Vec::new(),
            database: None,
            table: None,
            filters: Vec::new(),
            order: Vec::new(),
            table_state: TableState::new(),
            statements: StatementLog::new(),
        }
    }

    pub const fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    pub fn databases(&self) -> &[String] {
        &self.databases
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn filters(&self) -> &[ConditionSpec] {
        &self.filters
    }

    /// Chip labels of the active filters, in order.
    pub fn filter_labels(&self) -> Vec<&str> {
        self.filters
            .iter()
            .map(|c| c.display.as_deref().unwrap_or(c.field.as_str()))
            .collect()
    }

    pub fn order(&self) -> &[OrderSpec] {
        &self.order
    }

    pub const fn table_state(&self) -> &TableState {
        &self.table_state
    }

    pub const fn statements(&self) -> &StatementLog {
        &self.statements
    }

    /// Opens a connection and loads the database list.
    ///
    /// Everything cached from a previous connection is dropped first.
    pub async fn connect(&mut self, options: ConnectOptions) -> Result<()> {
        self.reset();
        self.bridge.open(options).await?;
        self.refresh_databases().await?;
        Ok(())
    }

    /// Closes the connection and clears all state, even when closing fails.
    pub async fn disconnect(&mut self) -> Result<bool> {
        let closed = self.bridge.close().await;
        self.reset();
        Ok(closed?)
    }

    /// Reloads the database list.
    pub async fn refresh_databases(&mut self) -> Result<&[String]> {
        self.databases = self.bridge.fetch_databases().await?;
        debug!(count = self.databases.len(), "Databases loaded");
        Ok(&self.databases)
    }

    /// Switches database, drops the table view and loads the table list.
    ///
    /// Returns `false` when there is no connection.
    pub async fn select_database(&mut self, name: &str) -> Result<bool> {
        if !self.bridge.select_database(name).await? {
            return Ok(false);
        }
        self.database = Some(name.to_string());
        self.close_table();
        self.tables = self.bridge.fetch_tables().await?;
        info!(database = %name, tables = self.tables.len(), "Database opened");
        Ok(true)
    }

    /// Opens a table: drops filters, order and rows, and loads its columns.
    pub async fn select_table(&mut self, name: &str) -> Result<()> {
        self.close_table();
        let columns = self.bridge.fetch_columns(name).await?;
        debug!(table = %name, columns = columns.len(), "Table opened");
        self.table = Some(name.to_string());
        self.table_state.set_columns(columns);
        Ok(())
    }

    /// Validates a dialog draft against the open table and appends it.
    pub fn add_filter(&mut self, draft: FilterDraft) -> Result<&ConditionSpec> {
        if self.table.is_none() {
            return Err(BrowserError::NoTableSelected);
        }
        let condition = draft.into_condition(self.table_state.columns())?;
        self.filters.push(condition);
        Ok(&self.filters[self.filters.len() - 1])
    }

    /// Removes the filter at `index`.
    pub fn remove_filter(&mut self, index: usize) -> Option<ConditionSpec> {
        (index < self.filters.len()).then(|| self.filters.remove(index))
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Replaces the sort order.
    pub fn set_order(&mut self, order: Vec<OrderSpec>) {
        self.order = order;
    }

    /// The query for the open table with the active filters and order.
    pub fn current_spec(&self) -> Result<QuerySpec> {
        let table = self.table.as_ref().ok_or(BrowserError::NoTableSelected)?;
        let mut spec = QuerySpec::new(table.clone());
        spec.conditions.clone_from(&self.filters);
        spec.order.clone_from(&self.order);
        Ok(spec)
    }

    /// Runs [`current_spec`](Self::current_spec) and stores the rows.
    pub async fn refresh_data(&mut self) -> Result<&[Row]> {
        let spec = self.current_spec()?;
        let rows = self.bridge.query(spec).await?;
        self.table_state.set_rows(rows);
        Ok(self.table_state.rows())
    }

    /// Moves pending `sql` notifications into the statement log.
    ///
    /// Returns how many were received.
    pub fn drain_statements(&mut self) -> usize {
        let mut received = 0;
        loop {
            match self.notifications.try_recv() {
                Ok(Notification::Sql { statement }) => {
                    self.statements.record(statement);
                    received += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Statement echo fell behind");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        received
    }

    fn close_table(&mut self) {
        self.table = None;
        self.filters.clear();
        self.order.clear();
        self.table_state.clear();
    }

    fn reset(&mut self) {
        self.close_table();
        self.database = None;
        self.databases.clear();
        self.tables.clear();
    }
}
