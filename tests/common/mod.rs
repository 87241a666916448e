//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which starts a wiremock TMDB server and a
//! [`ProviderHost`] whose HTTP client points at it.

#![allow(dead_code)]

use serde_json::json;
use tmdb_core::ClientSettings;
use tmdb_provider::{ProviderConfig, ProviderHost, TmdbProvider};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "integration-key";

/// Test harness wrapping a mock TMDB server and a provider host.
pub struct TestHarness {
    pub server: MockServer,
    pub host: ProviderHost,
}

impl TestHarness {
    /// Start a mock server and an unconfigured host pointing at it.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let host = ProviderHost::new(TmdbProvider::with_settings("test", settings_for(&server)));
        Self { server, host }
    }

    /// Start a mock server and a host configured with [`API_KEY`].
    pub async fn configured() -> Self {
        let mut harness = Self::new().await;
        let diags = harness
            .host
            .configure(&ProviderConfig::with_key(API_KEY), "");
        assert!(diags.is_empty(), "configure failed: {diags:?}");
        harness
    }

    /// Serve `body` with status 200 for GET `route`.
    pub async fn mock_json(&self, route: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Serve a TMDB error payload for GET `route`.
    pub async fn mock_error(&self, route: &str, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "success": false,
                "status_message": message,
            })))
            .mount(&self.server)
            .await;
    }
}

pub fn settings_for(server: &MockServer) -> ClientSettings {
    ClientSettings {
        base_url: server.uri(),
        requests_per_second: 100,
        timeout_secs: 5,
        ..ClientSettings::default()
    }
}

pub fn movie_json(id: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "overview": format!("Overview of {title}"),
        "release_date": "1999-10-15",
        "popularity": 61.4,
    })
}

pub fn page(results: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "page": 1,
        "results": results,
        "total_pages": 1,
        "total_results": 0,
    })
}
