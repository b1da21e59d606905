use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::models::SearchRequest;
use crate::results::{process, ProcessedResults};
use crate::search::{search_flights, FlightSearchApi};
use crate::storage::ResultsWriter;

/// What a completed run produced
#[derive(Debug, PartialEq)]
pub enum RunReport {
    NoFlights,
    Saved { path: PathBuf, count: usize },
}

/// Search, sort and persist flight offers for one request
pub async fn perform_search(
    api: &dyn FlightSearchApi,
    writer: &ResultsWriter,
    request: &SearchRequest,
) -> Result<RunReport> {
    info!("🔍 Searching flights via {}...", api.source_name());
    info!("From: {} → {}", request.origin, request.destination);
    info!("Departure: {}", request.departure_date);
    if let Some(return_date) = &request.return_date {
        info!("Return: {}", return_date);
    }
    if let Some(max_price) = &request.max_price {
        info!("Max Price: {} {}", max_price, request.currency);
    }

    let outcome = search_flights(api, request).await;

    let flights = match process(outcome)? {
        ProcessedResults::Empty => return Ok(RunReport::NoFlights),
        ProcessedResults::Sorted(flights) => flights,
    };

    let count = flights.len();
    let path = writer.save(request, flights).await?;

    Ok(RunReport::Saved { path, count })
}
