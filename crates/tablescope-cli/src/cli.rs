//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tablescope_session::client::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_USER};
use tablescope_session::ConnectOptions;

/// Browse MySQL databases from the terminal.
#[derive(Debug, Parser)]
#[command(name = "tablescope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Server host.
    #[arg(long, env = "TABLESCOPE_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Server port.
    #[arg(short = 'P', long, env = "TABLESCOPE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// User name.
    #[arg(short, long, env = "TABLESCOPE_USER", default_value = DEFAULT_USER)]
    pub user: String,

    /// Password.
    #[arg(
        short,
        long,
        env = "TABLESCOPE_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    pub password: String,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the SQL for a JSON query spec without connecting.
    Compile {
        /// Spec file, or `-` for stdin.
        #[arg(short, long)]
        spec: PathBuf,
    },

    /// List databases.
    Databases,

    /// List tables of a database.
    Tables {
        #[arg(short, long)]
        database: String,
    },

    /// Describe the columns of a table.
    Columns {
        #[arg(short, long)]
        database: String,

        #[arg(short, long)]
        table: String,
    },

    /// Run a query spec or raw SQL and print the rows as JSON.
    Query {
        #[arg(short, long)]
        database: String,

        /// Spec file, or `-` for stdin.
        #[arg(short, long, conflicts_with = "sql", required_unless_present = "sql")]
        spec: Option<PathBuf>,

        /// Raw SQL to run instead of a spec.
        #[arg(long)]
        sql: Option<String>,
    },

    /// Serve the bridge protocol as JSON lines on stdin/stdout.
    Serve,
}

impl Cli {
    /// Connection parameters from the global flags.
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions::new()
            .host(self.host.as_str())
            .port(self.port)
            .user(self.user.as_str())
            .password(self.password.as_str())
    }
}
