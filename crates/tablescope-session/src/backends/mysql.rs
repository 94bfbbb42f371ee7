//! MySQL backend on a single `sqlx` connection.
//!
//! Statements go through the text protocol (`sqlx::raw_sql`) because `USE`
//! and most `SHOW` statements are not preparable.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column, Connection, Executor as _, Row as _, TypeInfo, ValueRef};
use tablescope_query::{Row, Value};
use tracing::{debug, info};

use crate::client::{ConnectOptions, Connector, DbClient};

/// Opens MySQL connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnector;

impl MySqlConnector {
    /// Creates a connector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    async fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn DbClient>, sqlx::Error> {
        let connect_options = MySqlConnectOptions::new()
            .host(&options.host)
            .port(options.port)
            .username(&options.user)
            .password(&options.password);

        let conn = MySqlConnection::connect_with(&connect_options).await?;
        info!(host = %options.host, port = options.port, user = %options.user, "Connected to MySQL");

        Ok(Box::new(MySqlClient { conn: Some(conn) }))
    }
}

/// A live MySQL connection.
pub struct MySqlClient {
    conn: Option<MySqlConnection>,
}

#[async_trait]
impl DbClient for MySqlClient {
    async fn query(&mut self, sql: &str) -> Result<Vec<Row>, sqlx::Error> {
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| sqlx::Error::Protocol(String::from("connection already closed")))?;

        let rows = conn.fetch_all(sqlx::raw_sql(sql)).await?;
        debug!(rows = rows.len(), "Fetched rows");
        rows.iter().map(decode_row).collect()
    }

    async fn close(&mut self) -> Result<(), sqlx::Error> {
        match self.conn.take() {
            Some(conn) => conn.close().await,
            None => Ok(()),
        }
    }
}

fn decode_row(row: &MySqlRow) -> Result<Row, sqlx::Error> {
    let mut out = Row::with_capacity(row.columns().len());
    for column in row.columns() {
        let index = column.ordinal();
        let value = decode_cell(row, index, column.type_info().name())?;
        out.push(column.name(), value);
    }
    Ok(out)
}

fn decode_cell(row: &MySqlRow, index: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_name {
        "BOOLEAN" => Value::Bool(row.try_get_unchecked::<bool, _>(index)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
            Value::Int(row.try_get_unchecked::<i64, _>(index)?)
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => Value::UInt(row.try_get_unchecked::<u64, _>(index)?),
        "FLOAT" => Value::Float(f64::from(row.try_get_unchecked::<f32, _>(index)?)),
        "DOUBLE" => Value::Float(row.try_get_unchecked::<f64, _>(index)?),
        // Zero dates do not parse; they fall back to their text form.
        "DATE" => match row.try_get_unchecked::<NaiveDate, _>(index) {
            Ok(date) => Value::Date(date),
            Err(_) => raw_cell(row, index)?,
        },
        "DATETIME" | "TIMESTAMP" => match row.try_get_unchecked::<NaiveDateTime, _>(index) {
            Ok(datetime) => Value::DateTime(datetime),
            Err(_) => raw_cell(row, index)?,
        },
        "TIME" => match row.try_get_unchecked::<NaiveTime, _>(index) {
            Ok(time) => Value::Time(time),
            Err(_) => raw_cell(row, index)?,
        },
        _ => raw_cell(row, index)?,
    };
    Ok(value)
}

fn raw_cell(row: &MySqlRow, index: usize) -> Result<Value, sqlx::Error> {
    let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
    Ok(String::from_utf8(bytes).map_or_else(|e| Value::Bytes(e.into_bytes()), Value::Text))
}
