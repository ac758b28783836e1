//! OMDb (Open Movie Database) client.

use super::{FetchedMovie, MetadataHttpConfig, MetadataProvider, build_http_client};
use crate::config::OmdbConfig;
use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

/// OMDb metadata client.
pub struct OmdbClient {
    /// Service base URL.
    base_url: String,
    /// API key.
    api_key: Option<SecretString>,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl OmdbClient {
    /// Creates a client from OMDb settings.
    #[must_use]
    pub fn new(config: &OmdbConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            client: build_http_client(MetadataHttpConfig::from_config(config)),
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Sets HTTP client timeouts.
    #[must_use]
    pub fn with_http_config(mut self, config: MetadataHttpConfig) -> Self {
        self.client = build_http_client(config);
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends the lookup request and returns the decoded JSON body.
    fn request(&self, title: &str) -> Result<Value> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            Error::Config(format!(
                "OMDb API key is not configured (set {})",
                crate::config::API_KEY_ENV
            ))
        })?;

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("t", title), ("apikey", api_key.expose_secret())])
            .send()
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connect"
                } else if e.is_request() {
                    "request"
                } else {
                    "unknown"
                };
                tracing::error!(
                    provider = "omdb",
                    title,
                    error = %e,
                    error_kind = error_kind,
                    "Metadata request failed"
                );
                Error::OperationFailed {
                    operation: "omdb_request".to_string(),
                    cause: format!("{error_kind} error: {}", e.without_url()),
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
            tracing::error!(
                provider = "omdb",
                title,
                status = %status,
                "Metadata API returned error status"
            );
            return Err(Error::ExternalService {
                status: status.as_u16(),
                reason,
            });
        }

        response.json::<Value>().map_err(|e| {
            tracing::error!(provider = "omdb", title, error = %e, "Failed to parse metadata response");
            Error::OperationFailed {
                operation: "omdb_response".to_string(),
                cause: e.without_url().to_string(),
            }
        })
    }
}

impl MetadataProvider for OmdbClient {
    fn name(&self) -> &'static str {
        "omdb"
    }

    fn fetch(&self, title: &str) -> Result<FetchedMovie> {
        let body = self.request(title)?;
        parse_lookup_response(title, body)
    }
}

/// Interprets an OMDb lookup body.
///
/// OMDb reports a miss with HTTP 200 and `{"Response": "False", "Error": ...}`.
fn parse_lookup_response(title: &str, body: Value) -> Result<FetchedMovie> {
    if body.get("Response").and_then(Value::as_str) == Some("False") {
        let message = body
            .get("Error")
            .and_then(Value::as_str)
            .unwrap_or("Movie not found!");
        tracing::info!(provider = "omdb", title, reason = message, "Metadata lookup found no match");
        return Err(Error::NotFound(format!("could not fetch details for movie '{title}': {message}")));
    }

    serde_json::from_value(body).map_err(|e| Error::OperationFailed {
        operation: "omdb_response".to_string(),
        cause: e.to_string(),
    })
}
