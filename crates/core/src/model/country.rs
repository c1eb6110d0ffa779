use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CountryError {
    #[error("country name is empty")]
    EmptyName,

    #[error("flag url is not a valid url: {raw}")]
    InvalidFlagUrl { raw: String },
}

/// A country as used by the quiz: a display name and a flag image URL.
///
/// Construction validates both fields, so everything downstream (sampling,
/// question building, rendering) can rely on them being present and
/// well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    name: String,
    flag_url: Url,
}

impl Country {
    /// Build a country from raw API fields.
    ///
    /// # Errors
    ///
    /// Returns `CountryError::EmptyName` if the name is empty or whitespace.
    /// Returns `CountryError::InvalidFlagUrl` if the flag URL does not parse.
    pub fn new(name: impl Into<String>, flag_url: &str) -> Result<Self, CountryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CountryError::EmptyName);
        }
        let flag_url = Url::parse(flag_url).map_err(|_| CountryError::InvalidFlagUrl {
            raw: flag_url.to_string(),
        })?;

        Ok(Self { name, flag_url })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn flag_url(&self) -> &Url {
        &self.flag_url
    }
}
