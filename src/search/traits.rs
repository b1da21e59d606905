use crate::models::{Offer, SearchRequest};
use crate::search::types::SearchError;
use async_trait::async_trait;

/// Seam between the pipeline and a flight-offers provider
#[async_trait]
pub trait FlightSearchApi: Send + Sync {
    /// Run one search and return the offers exactly as the provider listed them
    async fn search_offers(&self, request: &SearchRequest) -> Result<Vec<Offer>, SearchError>;

    /// Get the name of the provider
    fn source_name(&self) -> &'static str;
}
