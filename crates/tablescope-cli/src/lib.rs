//! Library half of the `tablescope` binary: argument parsing, one-shot
//! commands and the JSON-lines server.

pub mod cli;
pub mod commands;
pub mod input;
pub mod serve;

pub use cli::{Cli, Command};
