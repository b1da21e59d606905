use crate::models::Offer;
use thiserror::Error;

/// Message used when a failure carries nothing more specific
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Why a search call did not produce offers
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Missing API credentials: {0} is not set")]
    MissingCredentials(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// The provider answered with a non-success status
    #[error("HTTP {status}: {}", .description.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Api {
        status: u16,
        description: Option<String>,
    },
}

impl SearchError {
    /// Text reported to the operator for this failure.
    ///
    /// Provider rejections report their description alone; other errors
    /// report their own message.
    pub fn error_message(&self) -> String {
        match self {
            Self::Api { description, .. } => description
                .clone()
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            other => other.to_string(),
        }
    }
}

/// Result of the search step, consumed once by the result processor
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Success(Vec<Offer>),
    Failure { error_message: String },
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
