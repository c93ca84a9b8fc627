use crate::core::{ConfigProvider, CountrySource, UpstreamCountry};
use crate::domain::model::UpstreamResponse;
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://restcountries.com/v3.1/alpha";
/// Only what `UpstreamCountry` maps. Extend both together.
pub const DEFAULT_API_FIELDS: &str = "name,postalCode";

/// `CountrySource` backed by the REST Countries API.
pub struct RestCountriesClient {
    client: Client,
    base_url: String,
    fields: String,
}

impl RestCountriesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            fields: DEFAULT_API_FIELDS.to_string(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs() {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| LookupError::ConfigError {
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base_url: config.api_base_url().to_string(),
            fields: config.api_fields().to_string(),
        })
    }

    fn country_url(&self, country_code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), country_code)
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    async fn fetch(&self, country_code: &str) -> Result<UpstreamCountry> {
        let url = self.country_url(country_code);
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("fields", self.fields.as_str())])
            .send()
            .await
            .map_err(|e| LookupError::UpstreamUnavailable {
                message: format!("request to {} failed: {}", url, e),
            })?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        // Malformed codes get 400, well-formed but unknown ones get 404.
        if status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND {
            return Err(LookupError::invalid_code(
                country_code,
                format!("rejected by upstream with status {}", status),
            ));
        }
        if !status.is_success() {
            return Err(LookupError::UpstreamUnavailable {
                message: format!("upstream answered {} for {}", status, url),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::UpstreamUnavailable {
                message: format!("failed to read response from {}: {}", url, e),
            })?;

        let parsed: UpstreamResponse =
            serde_json::from_slice(&body).map_err(|e| LookupError::ValidationError {
                message: format!("unexpected upstream payload for '{}': {}", country_code, e),
            })?;

        parsed
            .into_first()
            .ok_or_else(|| LookupError::ValidationError {
                message: format!("upstream returned no country for '{}'", country_code),
            })
    }
}
