//! The database client capability a session drives.
//!
//! A [`Connector`] opens connections; a [`DbClient`] runs raw SQL on one
//! connection and ends it. Backends live in [`crate::backends`].

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tablescope_query::Row;

/// Default server host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default server port.
pub const DEFAULT_PORT: u16 = 3306;
/// Default user name.
pub const DEFAULT_USER: &str = "root";

/// Connection parameters supplied by the caller at open time.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectOptions {
    /// Server host name or address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// User name.
    #[serde(default = "default_user")]
    pub user: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

fn default_host() -> String {
    String::from(DEFAULT_HOST)
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_user() -> String {
    String::from(DEFAULT_USER)
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            user: default_user(),
            password: String::new(),
        }
    }
}

impl ConnectOptions {
    /// Creates options pointing at `root@localhost:3306` with no password.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the user.
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}

impl fmt::Debug for ConnectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectOptions")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One live connection.
#[async_trait]
pub trait DbClient: Send {
    /// Runs raw SQL and returns the rows in server order.
    async fn query(&mut self, sql: &str) -> Result<Vec<Row>, sqlx::Error>;

    /// Ends the connection. The client is unusable afterwards.
    async fn close(&mut self) -> Result<(), sqlx::Error>;
}

/// Opens connections.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connects with the given options.
    async fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn DbClient>, sqlx::Error>;
}
