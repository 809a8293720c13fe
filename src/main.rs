//! parliament-ages - UK Parliament member age histogram builder
//!
//! Fetches biographical data for Commons and Lords members, aggregates
//! ages into band histograms per party, and merges them with a reference
//! UK population histogram into a chart document.

use anyhow::Result;
use clap::{Parser, Subcommand};
use parliament_ages::config::Config;
use parliament_ages::member::House;
use parliament_ages::pipeline::{build_chart_file, fetch_house};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "parliament-ages", version, about)]
struct Cli {
    /// Path to a TOML configuration file (falls back to the
    /// PARLIAMENT_AGES_CONFIG environment variable, then defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch current members of one house and save the member file
    Fetch {
        /// Which house to fetch: commons or lords
        #[arg(long)]
        house: House,
    },
    /// Aggregate saved member files into the chart document
    BuildChart,
    /// Fetch both houses, then build the chart document
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("parliament-ages v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Fetch { house } => fetch_house(&config, house).await?,
        Command::BuildChart => build_chart_file(&config)?,
        Command::Run => {
            fetch_house(&config, House::Commons).await?;
            fetch_house(&config, House::Lords).await?;
            build_chart_file(&config)?;
        }
    }

    Ok(())
}
