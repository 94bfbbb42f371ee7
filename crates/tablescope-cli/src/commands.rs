//! One-shot subcommands.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use tablescope_query::compile;
use tablescope_session::{Connector, QueryInput, Session};
use tracing::{info, warn};

use crate::cli::{Cli, Command};
use crate::input::read_spec;

/// Runs every subcommand except `serve`, writing results to `out`.
pub async fn run<W: Write>(cli: &Cli, connector: Arc<dyn Connector>, out: &mut W) -> anyhow::Result<()> {
    if let Command::Compile { spec } = &cli.command {
        let spec = read_spec(spec)?;
        writeln!(out, "{}", compile(&spec))?;
        return Ok(());
    }

    let mut session = Session::new(connector);
    session.set_observer(|sql| info!("{sql}"));
    session
        .connect(&cli.connect_options())
        .await
        .with_context(|| format!("failed to connect to {}:{}", cli.host, cli.port))?;

    let result = run_connected(&cli.command, &mut session, out).await;

    if let Err(e) = session.close().await {
        warn!(error = %e, "Failed to close session");
    }
    result
}

async fn run_connected<W: Write>(
    command: &Command,
    session: &mut Session,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Databases => {
            for name in session.list_databases().await? {
                writeln!(out, "{name}")?;
            }
        }

        Command::Tables { database } => {
            session.select_database(database).await?;
            for name in session.list_tables().await? {
                writeln!(out, "{name}")?;
            }
        }

        Command::Columns { database, table } => {
            session.select_database(database).await?;
            let columns = session.describe_table(table).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&columns)?)?;
        }

        Command::Query { database, spec, sql } => {
            session.select_database(database).await?;
            let input = match (spec, sql) {
                (Some(path), _) => QueryInput::Spec(read_spec(path)?),
                (None, Some(sql)) => QueryInput::Raw(sql.clone()),
                (None, None) => anyhow::bail!("either --spec or --sql is required"),
            };
            let rows = session.run_query(input).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        }

        Command::Compile { .. } | Command::Serve => {
            anyhow::bail!("command does not run on a one-shot session")
        }
    }
    Ok(())
}
