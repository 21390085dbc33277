//! `OmdbClient` - OMDB API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalOmdbApi;
use super::types::{OmdbErrorResponse, OmdbMovieDetails, OmdbSearchResponse, SearchParams};

/// Default base URL for the OMDB API.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDB API client.
///
/// Issues exactly one GET per call. There is no retry and no timeout;
/// callers that need a safe fallback degrade errors themselves.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key sent as the `apikey` query parameter.
    api_key: String,
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests or a proxy).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<OmdbClient> {
        let api_key = self.api_key.context("api_key is required")?;
        if api_key.trim().is_empty() {
            bail!("api_key must not be empty");
        }
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(OmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Sends a GET request to the base URL with the API key and query params.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(&self, query: &[(&str, String)]) -> Result<T> {
        let request = self
            .http_client
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str())])
            .query(query)
            .build()
            .context("failed to build OMDB request")?;

        // The request URL carries the API key; log only the caller params.
        tracing::debug!(?query, "OMDB API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .context("OMDB request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<OmdbErrorResponse>(&body) {
                bail!(
                    "OMDB API error (HTTP {status}): {}",
                    error_response.error
                );
            }
            bail!("OMDB API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .context("failed to read OMDB response body")?;
        serde_json::from_str(&body).context("failed to decode OMDB JSON response")
    }
}

impl LocalOmdbApi for OmdbClient {
    #[instrument(skip_all, fields(query = %params.query))]
    async fn search(&self, params: &SearchParams) -> Result<OmdbSearchResponse> {
        let mut query: Vec<(&str, String)> = vec![("s", params.query.clone())];
        if let Some(ref media_type) = params.media_type {
            query.push(("type", media_type.clone()));
        }

        self.get_json(&query).await
    }

    #[instrument(skip_all, fields(imdb_id = %imdb_id))]
    async fn title(&self, imdb_id: &str) -> Result<OmdbMovieDetails> {
        let query = [("i", String::from(imdb_id)), ("plot", String::from("full"))];
        self.get_json(&query).await
    }
}
