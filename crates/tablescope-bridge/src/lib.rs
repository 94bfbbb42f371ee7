//! # tablescope-bridge
//!
//! The request/response boundary between a browsing UI and its session.
//!
//! A [`Bridge`] owns at most one [`Session`](tablescope_session::Session)
//! and exposes it through seven named endpoints:
//!
//! | endpoint | inputs | output |
//! |---|---|---|
//! | `open` | host, port, user, password | bool |
//! | `close` | | bool |
//! | `selectDatabase` | database | bool |
//! | `fetchDatabases` | | names |
//! | `fetchTables` | | names |
//! | `fetchColumns` | table | columns |
//! | `query` | query spec | rows |
//!
//! Every statement the session runs is pushed to subscribers as a
//! [`Notification::Sql`].
//!
//! ## Two-tier errors
//!
//! Calling an endpoint before a session exists (or `fetchTables` before a
//! database is selected) is not an error: the endpoint answers `false` or
//! an empty list. Failures reported by the database are real errors and
//! reach the caller with the driver's text.
//!
//! ## JSON framing
//!
//! ```ignore
//! let bridge = Bridge::mysql();
//! let reply = bridge
//!     .handle_json(r#"{"method":"open","params":{"password":"secret"}}"#)
//!     .await;
//! assert_eq!(reply, r#"{"ok":true}"#);
//! ```

mod bridge;
mod error;
mod request;
mod response;

pub use bridge::{Bridge, NOTIFICATION_BUFFER_SIZE};
pub use error::{BridgeError, Result};
pub use request::{Request, ENDPOINTS};
pub use response::{Notification, Payload, Response};
