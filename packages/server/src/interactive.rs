//! Interactive server setup.
//!
//! Shows the street data sources the server will search, asks where to
//! listen, and optionally loads the datasets up front so a broken source
//! is reported before the first request instead of as a 503.

use council_lookup_source::SourceDefinition;
use dialoguer::{Confirm, Input};

use crate::{AppState, BindConfig, serve_on};

/// Prompts for server settings and runs the server.
///
/// Logging must already be initialized by the caller.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(sources: Vec<SourceDefinition>) -> std::io::Result<()> {
    println!("Council Lookup Server");
    println!();

    if sources.is_empty() {
        println!("No street data sources are configured; every lookup will fail.");
    } else {
        println!("Street data sources (tried in this order per role):");
        for summary in sources.iter().map(SourceDefinition::summary) {
            println!(
                "  {:<8} {:<20} {}",
                summary.role, summary.id, summary.location
            );
        }
    }
    println!();

    let defaults = BindConfig::from_env();

    let addr: String = Input::new()
        .with_prompt("Listen on address")
        .default(defaults.addr.clone())
        .interact_text()
        .unwrap_or(defaults.addr);

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let state = AppState::new(sources);

    let preload = Confirm::new()
        .with_prompt("Load street data now?")
        .default(true)
        .interact()
        .unwrap_or(false);

    if preload {
        match state.lookup.store().get().await {
            Ok(datasets) => {
                let stats = datasets.stats();
                println!(
                    "Loaded {} primary and {} backup street records.",
                    stats.primary_records, stats.backup_records
                );
            }
            Err(e) => {
                log::warn!("Preload failed: {e}");
                println!("Street data failed to load: {}", e.source_error());
                if !Confirm::new()
                    .with_prompt("Serve anyway (the next lookup retries the load)?")
                    .default(false)
                    .interact()
                    .unwrap_or(false)
                {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
        }
    }

    println!("Lookups: http://{addr}:{port}/api/lookup?address=201+E+Jefferson+St");
    serve_on(state, BindConfig { addr, port }).await
}
