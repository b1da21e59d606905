use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const API_KEY_VAR: &str = "AMADEUS_API_KEY";
pub const API_SECRET_VAR: &str = "AMADEUS_API_SECRET";
pub const HOSTNAME_VAR: &str = "AMADEUS_HOSTNAME";
pub const RESULTS_DIR_VAR: &str = "FLIGHT_SCOUT_RESULTS_DIR";

const RESULTS_DIR_NAME: &str = "results";

/// Amadeus environment the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiHost {
    #[default]
    Test,
    Production,
}

impl ApiHost {
    /// `production` selects the live API, anything else the test API
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Test
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Test => "https://test.api.amadeus.com",
            Self::Production => "https://api.amadeus.com",
        }
    }
}

/// Client credentials; either may be missing until the first API call
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Runtime settings gathered from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub host: ApiHost,
    pub results_dir: PathBuf,
}

impl Settings {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let results_dir = match non_empty_var(RESULTS_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_results_dir()?,
        };

        Ok(Self {
            credentials: Credentials {
                client_id: non_empty_var(API_KEY_VAR),
                client_secret: non_empty_var(API_SECRET_VAR),
            },
            host: non_empty_var(HOSTNAME_VAR)
                .map(|name| ApiHost::from_name(&name))
                .unwrap_or_default(),
            results_dir,
        })
    }
}

/// `results/` next to the running executable
fn default_results_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("Failed to locate the running executable")?;
    let dir = exe
        .parent()
        .map(|parent| parent.join(RESULTS_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(RESULTS_DIR_NAME));
    Ok(dir)
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
