//! Endpoint responses and push notifications.

use serde::{Deserialize, Serialize};
use tablescope_query::{ColumnInfo, Row};

/// What an endpoint returns on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// `open`, `close`, `selectDatabase`.
    Bool(bool),
    /// `fetchDatabases`, `fetchTables`.
    Names(Vec<String>),
    /// `fetchColumns`.
    Columns(Vec<ColumnInfo>),
    /// `query`.
    Rows(Vec<Row>),
}

/// Reply to one request: `{"ok": <payload>}` or `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Response {
    /// The endpoint succeeded.
    Ok(Payload),
    /// The endpoint failed; carries the raw error text.
    Error(String),
}

const ENCODE_FAILURE: &str = r#"{"error":"failed to encode response"}"#;

impl Response {
    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// Returns true for [`Response::Ok`].
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Encodes the response as one line of JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from(ENCODE_FAILURE))
    }
}

/// One-way message pushed to every subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Notification {
    /// A statement is about to run.
    Sql {
        /// The exact SQL text.
        statement: String,
    },
}

impl Notification {
    /// Encodes the notification as one line of JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from(ENCODE_FAILURE))
    }
}
