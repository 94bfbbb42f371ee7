//! Client backends.

mod memory;
mod mysql;

pub use memory::{MemoryClient, MemoryServer};
pub use mysql::{MySqlClient, MySqlConnector};
