use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_ADULTS: u32 = 1;
pub const DEFAULT_MAX_RESULTS: u32 = 250;

/// A single flight-offers search, built once from the command line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// IATA code of the departure location
    pub origin: String,
    /// IATA code of the arrival location
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    /// Upper bound on price, passed through as given
    pub max_price: Option<String>,
    pub currency: String,
    pub non_stop: bool,
    pub adults: u32,
    /// Cap on the number of offers the API returns
    pub max: u32,
}

impl SearchRequest {
    /// One-way search with every optional field at its default
    pub fn one_way(origin: &str, destination: &str, departure_date: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date: departure_date.to_string(),
            return_date: None,
            max_price: None,
            currency: DEFAULT_CURRENCY.to_string(),
            non_stop: false,
            adults: DEFAULT_ADULTS,
            max: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Price block of an offer
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// All-inclusive total as a decimal string
    #[serde(default, deserialize_with = "decimal_text::deserialize")]
    pub grand_total: String,
    #[serde(default)]
    pub currency: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Price {
    /// Grand total as a number, `None` when it is not a finite decimal
    pub fn amount(&self) -> Option<f64> {
        self.grand_total
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| !value.is_nan())
    }
}

/// Departure or arrival point of a segment
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentEndpoint {
    #[serde(default)]
    pub iata_code: String,
    /// Local date-time, e.g. `2024-06-01T08:15:00`
    #[serde(default)]
    pub at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One non-stop leg
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    #[serde(default)]
    pub departure: SegmentEndpoint,
    #[serde(default)]
    pub arrival: SegmentEndpoint,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One direction of travel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Itinerary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Priced flight option returned by the search API.
///
/// Fields the pipeline does not look at are kept in `extra` so the
/// persisted file carries the offer exactly as received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Offer {
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Document written to the results directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedResult {
    pub search_params: SearchRequest,
    pub flights: Vec<Offer>,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// ISO-8601 UTC with millisecond precision and a `Z` suffix
pub fn iso_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Accepts a price written either as a JSON string or a JSON number
mod decimal_text {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => text,
            Value::Number(number) => number.to_string(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::iso_timestamp(instant))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|instant| instant.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
