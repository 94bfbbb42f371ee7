//! View state slices.

use tablescope_query::{ColumnInfo, Row};

/// Columns and rows of the table being viewed.
///
/// Each half carries a loaded flag so an empty table can be told apart from
/// one that has not been fetched yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    columns: Vec<ColumnInfo>,
    columns_loaded: bool,
    rows: Vec<Row>,
    rows_loaded: bool,
}

impl TableState {
    /// Creates an empty, unloaded state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores fetched column information.
    pub fn set_columns(&mut self, columns: Vec<ColumnInfo>) {
        self.columns = columns;
        self.columns_loaded = true;
    }

    /// Stores fetched rows.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.rows_loaded = true;
    }

    /// Forgets columns and rows.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub const fn columns_loaded(&self) -> bool {
        self.columns_loaded
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub const fn rows_loaded(&self) -> bool {
        self.rows_loaded
    }
}

/// The SQL echo panel: the most recent statement the session ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementLog {
    last: Option<String>,
    seen: usize,
}

impl StatementLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a statement, replacing the displayed one.
    pub fn record(&mut self, statement: impl Into<String>) {
        self.last = Some(statement.into());
        self.seen += 1;
    }

    /// The statement on display, if any.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Number of statements recorded since creation.
    pub const fn seen(&self) -> usize {
        self.seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_state_flags() {
        let mut state = TableState::new();
        assert!(!state.columns_loaded());
        assert!(!state.rows_loaded());

        state.set_rows(Vec::new());
        assert!(state.rows_loaded());
        assert!(state.rows().is_empty());

        state.clear();
        assert_eq!(state, TableState::new());
    }

    #[test]
    fn test_statement_log_keeps_latest() {
        let mut log = StatementLog::new();
        assert_eq!(log.last(), None);
        log.record("SHOW DATABASES;");
        log.record("USE school;");
        assert_eq!(log.last(), Some("USE school;"));
        assert_eq!(log.seen(), 2);
    }
}
