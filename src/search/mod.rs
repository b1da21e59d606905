pub mod amadeus;
pub mod traits;
pub mod types;

pub use amadeus::AmadeusClient;
pub use traits::FlightSearchApi;
pub use types::{SearchError, SearchOutcome, UNKNOWN_ERROR};

use crate::models::SearchRequest;
use tracing::error;

/// Run a single search and fold any failure into a [`SearchOutcome`]
pub async fn search_flights(api: &dyn FlightSearchApi, request: &SearchRequest) -> SearchOutcome {
    match api.search_offers(request).await {
        Ok(offers) => SearchOutcome::Success(offers),
        Err(err) => {
            error!("Flight search error ({}): {:?}", api.source_name(), err);
            SearchOutcome::Failure {
                error_message: err.error_message(),
            }
        }
    }
}
