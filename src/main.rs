use std::process::ExitCode;

use flight_scout::cli::parse_args;
use flight_scout::config::Settings;
use flight_scout::pipeline::{perform_search, RunReport};
use flight_scout::search::AmadeusClient;
use flight_scout::storage::ResultsWriter;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("✈️  Flight Scout - Amadeus Flight Offers Search");
    info!("==============================================");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("❌ Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Errors returned from here end the process with exit code 1
async fn run() -> anyhow::Result<()> {
    let request = parse_args()?;
    let settings = Settings::from_env()?;
    let client = AmadeusClient::new(&settings)?;
    let writer = ResultsWriter::new(&settings.results_dir);

    match perform_search(&client, &writer, &request).await {
        Ok(RunReport::Saved { path, count }) => {
            info!("✅ Saved {} flights to {}", count, path.display());
        }
        Ok(RunReport::NoFlights) => {}
        Err(err) => error!("❌ Error: {:#}", err),
    }

    Ok(())
}
