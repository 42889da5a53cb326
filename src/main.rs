use std::io;
use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use savings_group::core::{Ledger, validate_catalog};

#[derive(Parser, Debug)]
#[command(
    name = "savings-group",
    version,
    about = "Simulate a twelve-member savings group with weekly simple interest"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Serve the form-and-table view and its JSON API")]
    Serve {
        #[arg(long, env = "SAVINGS_GROUP_PORT", default_value_t = 8080)]
        port: u16,
        #[arg(long, env = "SAVINGS_GROUP_BIND", default_value = "0.0.0.0")]
        bind: IpAddr,
    },
    #[command(about = "Drive the ledger from stdin, one command per line")]
    Session,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,savings_group=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    validate_catalog().map_err(|e| anyhow!("tier catalog is invalid: {e}"))?;

    match cli.command {
        Command::Serve { port, bind } => {
            let addr = SocketAddr::new(bind, port);
            savings_group::api::run_http_server(addr)
                .await
                .with_context(|| format!("http server on {addr} failed"))?;
        }
        Command::Session => {
            let mut ledger = Ledger::new();
            savings_group::session::run(&mut ledger, io::stdin().lock(), io::stdout().lock())
                .context("session i/o failed")?;
        }
    }
    Ok(())
}
