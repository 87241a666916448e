//! HTTP implementation of [`MovieCatalog`] against the TMDB v3 REST API.
//!
//! Features:
//! - Token-bucket rate limiting via [`governor`], configured by
//!   [`ClientSettings::requests_per_second`].
//! - Per-request transport timeout from [`ClientSettings::timeout_secs`].
//! - No retries: a 429 is reported like any other non-success status.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use tmdb_core::config::DEFAULT_BASE_URL;
use tmdb_core::{ClientSettings, Credential};

use crate::catalog::{Movie, MovieCatalog};
use crate::error::ClientError;

// ---------------------------------------------------------------------------
// TMDB API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbPage {
    results: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    status_message: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

type DirectLimiter =
    RateLimiter<governor::state::NotKeyed, governor::state::InMemoryState, governor::clock::DefaultClock>;

/// TMDB HTTP client.
///
/// Immutable once constructed and safe to share behind an `Arc` across
/// concurrent reads.
///
/// # Examples
///
/// ```no_run
/// use tmdb_client::TmdbClient;
/// use tmdb_core::{ClientSettings, Credential};
///
/// let client = TmdbClient::new(&Credential::new("your-api-key"), &ClientSettings::default())?;
/// # Ok::<(), tmdb_client::ClientError>(())
/// ```
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Credential,
    language: String,
    limiter: DirectLimiter,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    /// Create a client for the given API key.
    ///
    /// Fails if the key is empty or contains whitespace or control
    /// characters, if the base URL is not absolute, or if the HTTP client
    /// cannot be built. No request is made.
    pub fn new(api_key: &Credential, settings: &ClientSettings) -> Result<Self, ClientError> {
        validate_api_key(api_key.expose())?;

        let base_url = if settings.base_url.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            settings.base_url.trim_end_matches('/').to_string()
        };
        reqwest::Url::parse(&base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder();
        if settings.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        }
        let http = builder.build().map_err(ClientError::Build)?;

        let per_second = NonZeroU32::new(settings.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(Self {
            http,
            base_url,
            api_key: api_key.clone(),
            language: settings.language.clone(),
            limiter,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a rate-limited GET and decode the JSON body.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        self.limiter.until_ready().await;

        let url = format!("{}{path}", self.base_url);
        let mut params: Vec<(&str, &str)> = vec![("api_key", self.api_key.expose())];
        if !self.language.is_empty() {
            params.push(("language", self.language.as_str()));
        }
        params.extend_from_slice(extra_params);

        debug!(path, "TMDB request");
        // The request URL carries the API key, so it is stripped from every
        // transport error.
        let resp = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.without_url()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| e.without_url().to_string());
            let message = serde_json::from_str::<TmdbErrorBody>(&body)
                .ok()
                .and_then(|b| b.status_message)
                .unwrap_or(body);
            debug!(path, status = status.as_u16(), "TMDB returned error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Request(e.without_url()))?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn validate_api_key(key: &str) -> Result<(), ClientError> {
    if key.is_empty() {
        return Err(ClientError::InvalidApiKey("API key is empty".into()));
    }
    if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ClientError::InvalidApiKey(
            "API key contains whitespace or control characters".into(),
        ));
    }
    Ok(())
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn fetch_by_id(&self, id: i64) -> Result<Movie, ClientError> {
        self.get(&format!("/movie/{id}"), &[]).await
    }

    async fn fetch_popular(&self) -> Result<Vec<Movie>, ClientError> {
        let page: TmdbPage = self.get("/movie/popular", &[]).await?;
        Ok(page.results)
    }

    async fn fetch_by_query(&self, query: &str) -> Result<Vec<Movie>, ClientError> {
        let page: TmdbPage = self.get("/search/movie", &[("query", query)]).await?;
        Ok(page.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn settings() -> ClientSettings {
        ClientSettings::default()
    }

    #[test]
    fn rejects_empty_key() {
        let err = TmdbClient::new(&Credential::new(""), &settings()).unwrap_err();
        assert_matches!(err, ClientError::InvalidApiKey(_));
    }

    #[test]
    fn rejects_key_with_whitespace() {
        let err = TmdbClient::new(&Credential::new("abc def"), &settings()).unwrap_err();
        assert_matches!(err, ClientError::InvalidApiKey(msg) if msg.contains("whitespace"));

        let err = TmdbClient::new(&Credential::new("abc\n"), &settings()).unwrap_err();
        assert_matches!(err, ClientError::InvalidApiKey(_));
    }

    #[test]
    fn rejects_relative_base_url() {
        let settings = ClientSettings {
            base_url: "api.themoviedb.org/3".into(),
            ..settings()
        };
        let err = TmdbClient::new(&Credential::new("key"), &settings).unwrap_err();
        assert_matches!(err, ClientError::InvalidBaseUrl { .. });
    }

    #[test]
    fn trims_trailing_slash_and_defaults_empty_url() {
        let trailing = ClientSettings {
            base_url: "http://localhost:8080/3/".into(),
            ..settings()
        };
        let client = TmdbClient::new(&Credential::new("key"), &trailing).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/3");

        let empty = ClientSettings {
            base_url: String::new(),
            ..settings()
        };
        let client = TmdbClient::new(&Credential::new("key"), &empty).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn zero_rate_is_accepted() {
        let settings = ClientSettings {
            requests_per_second: 0,
            ..settings()
        };
        assert!(TmdbClient::new(&Credential::new("key"), &settings).is_ok());
    }

    #[test]
    fn debug_masks_key() {
        let client = TmdbClient::new(&Credential::new("super-secret"), &settings()).unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }
}
