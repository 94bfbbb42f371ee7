//! Endpoint requests.

use serde::{Deserialize, Serialize};
use tablescope_query::QuerySpec;
use tablescope_session::ConnectOptions;

/// Names of every endpoint, in declaration order.
pub const ENDPOINTS: &[&str] = &[
    "open",
    "close",
    "selectDatabase",
    "fetchDatabases",
    "fetchTables",
    "fetchColumns",
    "query",
];

/// A call to one endpoint.
///
/// On the wire: `{"method": "<endpoint>", "params": {...}}`. Endpoints
/// without inputs may omit `params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "camelCase")]
pub enum Request {
    /// Connect with the given parameters.
    Open(ConnectOptions),
    /// Release the connection.
    Close,
    /// Switch the current database.
    SelectDatabase {
        /// Database name.
        database: String,
    },
    /// List databases.
    FetchDatabases,
    /// List tables of the current database.
    FetchTables,
    /// Describe the columns of a table.
    FetchColumns {
        /// Table name.
        table: String,
    },
    /// Run a structured query.
    Query(QuerySpec),
}

impl Request {
    /// Returns the endpoint name.
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Open(_) => "open",
            Self::Close => "close",
            Self::SelectDatabase { .. } => "selectDatabase",
            Self::FetchDatabases => "fetchDatabases",
            Self::FetchTables => "fetchTables",
            Self::FetchColumns { .. } => "fetchColumns",
            Self::Query(_) => "query",
        }
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.endpoint())
    }
}
