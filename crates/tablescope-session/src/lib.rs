//! # tablescope-session
//!
//! One MySQL connection and its lifecycle.
//!
//! A [`Session`] starts disconnected, becomes connected after
//! [`Session::connect`], and has a current database after
//! [`Session::select_database`]. It lists databases and tables, describes
//! columns, and runs [`QuerySpec`](tablescope_query::QuerySpec)s or raw
//! SQL. Each statement is reported to an observer before it runs, which is
//! how the browser echoes SQL to the operator.
//!
//! The database itself is reached through the [`Connector`] and
//! [`DbClient`] traits. [`backends::MySqlConnector`] talks to a real server;
//! [`backends::MemoryServer`] answers from canned results.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tablescope_session::{backends::MySqlConnector, ConnectOptions, Session};
//!
//! let mut session = Session::new(Arc::new(MySqlConnector::new()));
//! session.set_observer(|sql| println!("{sql}"));
//! session.connect(&ConnectOptions::new().password("secret")).await?;
//! session.select_database("school").await?;
//! let tables = session.list_tables().await?;
//! ```

pub mod backends;
pub mod client;
pub mod error;
pub mod session;

pub use client::{ConnectOptions, Connector, DbClient};
pub use error::{CloseError, ConnectError, QueryError};
pub use session::{CloseOutcome, QueryInput, Session, SessionState, SqlObserver};
