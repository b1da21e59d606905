use crate::config::{Credentials, Settings, API_KEY_VAR, API_SECRET_VAR};
use crate::models::{Offer, SearchRequest};
use crate::search::traits::FlightSearchApi;
use crate::search::types::SearchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";

/// Amadeus Flight Offers Search client
pub struct AmadeusClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct FlightOffersResponse {
    #[serde(default)]
    data: Vec<Offer>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    title: Option<String>,
    detail: Option<String>,
}

impl AmadeusClient {
    /// Create a client for the host and credentials in `settings`
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_base_url(settings.host.base_url(), settings.credentials.clone())
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(base_url: &str, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("flight-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Exchange the client credentials for a bearer token
    async fn access_token(&self) -> Result<String, SearchError> {
        let client_id = self
            .credentials
            .client_id
            .as_deref()
            .ok_or(SearchError::MissingCredentials(API_KEY_VAR))?;
        let client_secret = self
            .credentials
            .client_secret
            .as_deref()
            .ok_or(SearchError::MissingCredentials(API_SECRET_VAR))?;

        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        debug!("Requesting access token from {}", url);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
            .send()
            .await?;

        let body = read_success_body(response).await?;
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::InvalidResponse(format!("token response: {}", e)))?;

        Ok(token.access_token)
    }
}

#[async_trait]
impl FlightSearchApi for AmadeusClient {
    async fn search_offers(&self, request: &SearchRequest) -> Result<Vec<Offer>, SearchError> {
        let token = self.access_token().await?;

        let url = format!("{}{}", self.base_url, FLIGHT_OFFERS_PATH);
        let query = build_query(request);
        debug!("Fetching {} with {} parameters", url, query.len());

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await?;

        let body = read_success_body(response).await?;
        debug!("Downloaded {} bytes of offers", body.len());

        let offers: FlightOffersResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        info!("Amadeus returned {} offers", offers.data.len());
        Ok(offers.data)
    }

    fn source_name(&self) -> &'static str {
        "Amadeus"
    }
}

/// Query parameters for the flight-offers endpoint.
///
/// `returnDate` and `maxPrice` are only sent when the request has them.
pub fn build_query(request: &SearchRequest) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("originLocationCode", request.origin.clone()),
        ("destinationLocationCode", request.destination.clone()),
        ("departureDate", request.departure_date.clone()),
        ("adults", request.adults.to_string()),
        ("nonStop", request.non_stop.to_string()),
        ("currencyCode", request.currency.clone()),
        ("max", request.max.to_string()),
    ];

    if let Some(return_date) = &request.return_date {
        query.push(("returnDate", return_date.clone()));
    }
    if let Some(max_price) = &request.max_price {
        query.push(("maxPrice", max_price.clone()));
    }

    query
}

/// Body of a 2xx response, or the decoded API error otherwise
async fn read_success_body(response: Response) -> Result<String, SearchError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!("Amadeus returned status: {}", status);
        return Err(SearchError::Api {
            status: status.as_u16(),
            description: describe_error_body(&body),
        });
    }

    Ok(body)
}

/// Human-readable description of an Amadeus error payload, if it has one
fn describe_error_body(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    let details: Vec<String> = parsed
        .errors
        .into_iter()
        .filter_map(|entry| entry.detail.or(entry.title))
        .filter(|text| !text.is_empty())
        .collect();

    if !details.is_empty() {
        return Some(details.join("; "));
    }

    parsed.error_description.filter(|text| !text.is_empty())
}
