//! Interactive prompt for the council lookup CLI.

use council_lookup_source::SourceDefinition;
use dialoguer::{Input, Select};

/// Top-level actions available in the interactive menu.
enum Tool {
    Lookup,
    ListSources,
    Stats,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[Self::Lookup, Self::ListSources, Self::Stats, Self::Server];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Lookup => "Look up addresses",
            Self::ListSources => "List sources",
            Self::Stats => "Show dataset sizes",
            Self::Server => "Start server",
        }
    }
}

/// Prompts for an action and runs it.
///
/// # Errors
///
/// Returns an error if a prompt fails, the datasets cannot be loaded for
/// the dataset sizes, or the server fails to start.
pub async fn run(sources: Vec<SourceDefinition>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Syracuse Council District Lookup");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Lookup => lookup_loop(sources).await?,
        Tool::ListSources => crate::print_sources(&sources),
        Tool::Stats => crate::print_stats(&crate::lookup_over(sources)).await?,
        Tool::Server => {
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new()
                    .block_on(council_lookup_server::interactive::run(sources))
            })
            .await??;
        }
    }

    Ok(())
}

/// Reads addresses until an empty line, printing each result.
///
/// A failed load is reported and the prompt continues; the next address
/// retries the load.
async fn lookup_loop(sources: Vec<SourceDefinition>) -> Result<(), Box<dyn std::error::Error>> {
    let lookup = crate::lookup_over(sources);

    println!("Enter an address, or an empty line to quit.");

    loop {
        let address: String = Input::new()
            .with_prompt("Address")
            .allow_empty(true)
            .interact_text()?;

        if address.trim().is_empty() {
            break;
        }

        match lookup.search_latest(&address).await {
            Ok(Some(outcome)) => println!("{}\n", outcome.render(lookup.directory())),
            Ok(None) => {}
            Err(e) => {
                log::error!("Lookup failed: {e}");
                println!("{}\n", e.message());
            }
        }
    }

    Ok(())
}
