#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for Syracuse council district lookup.
//!
//! Runs a single lookup, lists the configured street data sources, prints
//! dataset sizes, or starts the HTTP server. Without a subcommand it drops
//! into an interactive prompt.

mod interactive;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use council_lookup::Lookup;
use council_lookup_server::AppState;
use council_lookup_source::{DatasetStore, SourceDefinition, configured_sources};

#[derive(Parser)]
#[command(name = "council_lookup", about = "Syracuse council district lookup")]
struct Cli {
    /// Comma-separated list of source IDs to load (overrides `COUNCIL_LOOKUP_SOURCES` env var)
    #[arg(long, global = true)]
    sources: Option<String>,
    /// Street data CSV (local path or http(s) URL) searched before every other primary source
    #[arg(long, global = true)]
    csv: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the council district for an address
    Lookup {
        /// Street address (e.g., "201 E Jefferson St")
        address: String,
    },
    /// List the configured street data sources
    Sources,
    /// Load the datasets and print their sizes
    Stats,
    /// Start the HTTP API server
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let sources = configured_sources(cli.sources, cli.csv.as_deref());

    let Some(command) = cli.command else {
        return interactive::run(sources).await;
    };

    match command {
        Commands::Lookup { address } => {
            let lookup = lookup_over(sources);
            match lookup.search(&address).await {
                Ok(outcome) => println!("{}", outcome.render(lookup.directory())),
                Err(e) => {
                    eprintln!("{}", e.message());
                    return Err(e.into());
                }
            }
        }
        Commands::Sources => print_sources(&sources),
        Commands::Stats => print_stats(&lookup_over(sources)).await?,
        Commands::Serve => serve(sources).await?,
    }

    Ok(())
}

fn lookup_over(sources: Vec<SourceDefinition>) -> Lookup {
    Lookup::new(Arc::new(DatasetStore::from_sources(sources)))
}

fn print_sources(sources: &[SourceDefinition]) {
    println!("{:<20} {:<8} {:>8} {:<10} LOCATION", "ID", "ROLE", "PRIORITY", "FETCHER");
    println!("{}", "-".repeat(70));
    for summary in sources.iter().map(SourceDefinition::summary) {
        let enabled = if summary.enabled { "" } else { " (disabled)" };
        println!(
            "{:<20} {:<8} {:>8} {:<10} {}{enabled}",
            summary.id, summary.role, summary.priority, summary.fetcher, summary.location
        );
    }
}

async fn print_stats(lookup: &Lookup) -> Result<(), Box<dyn std::error::Error>> {
    let stats = lookup.store().get().await?.stats();
    println!("Primary records: {}", stats.primary_records);
    println!("Backup records:  {}", stats.backup_records);
    println!("Total:           {}", stats.total());
    Ok(())
}

/// Serves the HTTP API until shut down.
///
/// The server uses actix-web's runtime, so it runs in a blocking task to
/// avoid nesting tokio runtimes.
async fn serve(sources: Vec<SourceDefinition>) -> Result<(), Box<dyn std::error::Error>> {
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new().block_on(council_lookup_server::serve(AppState::new(sources)))
    })
    .await??;
    Ok(())
}
