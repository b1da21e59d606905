use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::Parser;
use thiserror::Error;

use crate::models::{SearchRequest, DEFAULT_ADULTS, DEFAULT_CURRENCY, DEFAULT_MAX_RESULTS};

/// Positional command line of the flight search.
///
/// Every token is taken as raw text; defaults are applied in
/// [`Cli::into_request`] so that malformed optional values fall back
/// instead of aborting the run.
#[derive(Parser, Debug, Default)]
#[command(name = "flight-scout")]
#[command(allow_negative_numbers = true)]
#[command(version, about = "Search flight offers and save them sorted by price", long_about = None)]
pub struct Cli {
    /// Origin location code (e.g. JFK)
    #[arg(allow_hyphen_values = true)]
    pub origin: Option<String>,
    /// Destination location code (e.g. LAX)
    #[arg(allow_hyphen_values = true)]
    pub destination: Option<String>,
    /// Departure date, YYYY-MM-DD
    #[arg(allow_hyphen_values = true)]
    pub departure_date: Option<String>,
    /// Return date, YYYY-MM-DD
    #[arg(allow_hyphen_values = true)]
    pub return_date: Option<String>,
    /// Maximum price per traveler
    #[arg(allow_hyphen_values = true)]
    pub max_price: Option<String>,
    /// Currency code [default: USD]
    #[arg(allow_hyphen_values = true)]
    pub currency: Option<String>,
    /// Non-stop flights only when exactly "true"
    #[arg(allow_hyphen_values = true)]
    pub non_stop: Option<String>,
    /// Number of adult travelers [default: 1]
    #[arg(allow_hyphen_values = true)]
    pub adults: Option<String>,
    /// Maximum number of offers to request [default: 250]
    #[arg(allow_hyphen_values = true)]
    pub max: Option<String>,
    /// Tokens past the ninth position are ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub rest: Vec<String>,
}

#[derive(Error, Debug, PartialEq)]
pub enum ArgsError {
    #[error("missing required argument: {0}")]
    MissingRequired(&'static str),
}

impl Cli {
    /// Build the search request, applying defaults for optional tokens
    pub fn into_request(self) -> Result<SearchRequest, ArgsError> {
        Ok(SearchRequest {
            origin: required(self.origin, "origin")?,
            destination: required(self.destination, "destination")?,
            departure_date: required(self.departure_date, "departureDate")?,
            return_date: non_empty(self.return_date),
            max_price: non_empty(self.max_price),
            currency: non_empty(self.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            non_stop: self.non_stop.as_deref() == Some("true"),
            adults: positive_or(self.adults.as_deref(), DEFAULT_ADULTS),
            max: positive_or(self.max.as_deref(), DEFAULT_MAX_RESULTS),
        })
    }
}

/// Parse the process arguments.
///
/// `--help` and `--version` print and exit; every other parse failure is
/// returned so the caller decides the exit code.
pub fn parse_args() -> Result<SearchRequest, anyhow::Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
        Err(err) => return Err(err.into()),
    };
    Ok(cli.into_request()?)
}

/// Parse positional tokens the way `Cli` would from `argv`
pub fn parse_tokens<I, T>(tokens: I) -> Result<SearchRequest, anyhow::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let argv = std::iter::once(OsString::from("flight-scout")).chain(tokens.into_iter().map(Into::into));
    let cli = Cli::try_parse_from(argv)?;
    Ok(cli.into_request()?)
}

fn required(token: Option<String>, name: &'static str) -> Result<String, ArgsError> {
    non_empty(token).ok_or(ArgsError::MissingRequired(name))
}

fn non_empty(token: Option<String>) -> Option<String> {
    token.filter(|value| !value.is_empty())
}

/// Leading-digit integer parse; zero, missing or garbage gives `default`
fn positive_or(token: Option<&str>, default: u32) -> u32 {
    let digits: String = token
        .unwrap_or("")
        .trim_start()
        .trim_start_matches('+')
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<u32>() {
        Ok(0) | Err(_) => default,
        Ok(value) => value,
    }
}
