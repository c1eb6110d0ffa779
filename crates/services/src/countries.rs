//! Country data sources.
//!
//! The quiz only ever sees validated [`Country`] values; raw API records are
//! filtered here, at the boundary.

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use quiz_core::model::Country;

use crate::error::CountryApiError;

/// Default endpoint, requesting only the fields the quiz needs.
pub const REST_COUNTRIES_ENDPOINT: &str = "https://restcountries.com/v3.1/all?fields=name,flags";

/// Anything that can produce the full country list.
///
/// The UI and tests depend on this seam, not on `reqwest`.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Fetch all available countries, already validated.
    async fn fetch_all(&self) -> Result<Vec<Country>, CountryApiError>;
}

/// HTTP client for the public REST Countries API.
#[derive(Clone)]
pub struct RestCountriesClient {
    client: Client,
    endpoint: String,
}

impl Default for RestCountriesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RestCountriesClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            endpoint: REST_COUNTRIES_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different endpoint (e.g. a local fixture server).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    async fn fetch_all(&self) -> Result<Vec<Country>, CountryApiError> {
        let response = self.client.get(&self.endpoint).send().await?;
        if !response.status().is_success() {
            return Err(CountryApiError::HttpStatus(response.status()));
        }

        let records: Vec<CountryRecord> = response.json().await?;
        Ok(validate_records(records))
    }
}

/// Fixed in-memory source for tests and offline runs.
#[derive(Clone, Default)]
pub struct FixedCountrySource {
    countries: Vec<Country>,
}

impl FixedCountrySource {
    #[must_use]
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }
}

#[async_trait]
impl CountrySource for FixedCountrySource {
    async fn fetch_all(&self) -> Result<Vec<Country>, CountryApiError> {
        Ok(self.countries.clone())
    }
}

// Wire records are lenient on purpose: a record missing a field must not sink
// the whole response, it just gets dropped in validation.
#[derive(Debug, Default, Deserialize)]
struct CountryRecord {
    #[serde(default)]
    name: NameField,
    #[serde(default)]
    flags: FlagsField,
}

#[derive(Debug, Default, Deserialize)]
struct NameField {
    common: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FlagsField {
    svg: Option<String>,
}

fn validate_records(records: Vec<CountryRecord>) -> Vec<Country> {
    let total = records.len();
    let mut seen = HashSet::new();
    let mut countries = Vec::with_capacity(total);

    for record in records {
        let (Some(name), Some(svg)) = (record.name.common, record.flags.svg) else {
            continue;
        };
        let Ok(country) = Country::new(name, &svg) else {
            continue;
        };
        // Duplicate names would make option sets ambiguous.
        if seen.insert(country.name().to_string()) {
            countries.push(country);
        }
    }

    let dropped = total - countries.len();
    if dropped > 0 {
        log::warn!("dropped {dropped} of {total} country records (malformed or duplicate)");
    }
    countries
}
