//! tablescope CLI
//!
//! Browse MySQL databases from the terminal, or serve the bridge protocol
//! over stdin/stdout.

use std::io;
use std::sync::Arc;

use clap::Parser;
use tablescope_bridge::Bridge;
use tablescope_cli::{commands, serve::serve, Cli, Command};
use tablescope_session::backends::MySqlConnector;
use tablescope_session::Connector;
use tokio::io::BufReader;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries results.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let connector: Arc<dyn Connector> = Arc::new(MySqlConnector::new());

    match cli.command {
        Command::Serve => {
            let bridge = Bridge::new(connector);
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            serve(&bridge, stdin, &mut stdout).await
        }
        _ => commands::run(&cli, connector, &mut io::stdout().lock()).await,
    }
}
