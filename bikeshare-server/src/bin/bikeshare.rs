//! Command-line station listing.

use std::process::ExitCode;

use bikeshare_server::gbfs::{DEFAULT_BASE_URL, GbfsClient, GbfsConfig};
use bikeshare_server::service::StationService;
use bikeshare_server::table::{render_stations, render_stations_pretty};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Query a GBFS bike-share feed.
#[derive(Debug, Parser)]
#[command(name = "bikeshare")]
struct Cli {
    /// Base URL of the GBFS feed
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List stations with bikes and docks available
    List {
        /// Draw a title and column rules
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so the table on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = GbfsConfig::new()
        .with_base_url(cli.base_url)
        .with_client_identifier("bikeshare-cli");
    let client = match GbfsClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::List { pretty } => {
            let stations = match StationService::new(client).fetch_stations().await {
                Ok(stations) => stations.records,
                Err(e) => {
                    eprintln!("error: station feed unavailable: {e}");
                    return ExitCode::FAILURE;
                }
            };

            let table = if pretty {
                render_stations_pretty(&stations)
            } else {
                render_stations(&stations)
            };
            print!("{table}");
        }
    }

    ExitCode::SUCCESS
}
