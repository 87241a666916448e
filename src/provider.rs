//! The provider root.
//!
//! [`TmdbProvider`] owns credential resolution and client construction and
//! enumerates the data sources it serves. The host configures it exactly
//! once before any data source read; the resulting [`ClientHandle`] is then
//! shared read-only by every data source.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tmdb_core::config::{API_KEY_ATTRIBUTE, API_KEY_ENV, PROVIDER_TYPE_NAME};
use tmdb_core::{Attribute, ClientSettings, Diagnostics, Schema, Value};

use crate::datasource::{
    DataSourceFactory, MovieDataSource, PopularMoviesDataSource, SearchDataSource,
};
use crate::factory::{build_client, ClientFactory, ClientHandle, HttpClientFactory};
use crate::resolve::resolve;

/// Provider-level configuration as declared by the practitioner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// TMDB API key. Falls back to the `TMDB_KEY` environment variable.
    #[serde(default)]
    pub key: Value<String>,
}

impl ProviderConfig {
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Value::Known(key.into()),
        }
    }
}

/// The TMDB provider.
pub struct TmdbProvider {
    /// Set to the release version, "dev" for local builds, and "test" in
    /// tests.
    version: String,
    factory: Box<dyn ClientFactory>,
    client: Option<ClientHandle>,
}

impl TmdbProvider {
    /// Provider talking to TMDB over HTTP with default settings.
    pub fn new(version: impl Into<String>) -> Self {
        Self::with_settings(version, ClientSettings::default())
    }

    pub fn with_settings(version: impl Into<String>, settings: ClientSettings) -> Self {
        Self::with_factory(version, HttpClientFactory::new(settings))
    }

    /// Provider building its client through a custom factory.
    pub fn with_factory(version: impl Into<String>, factory: impl ClientFactory + 'static) -> Self {
        Self {
            version: version.into(),
            factory: Box::new(factory),
            client: None,
        }
    }

    /// Provider type name; the namespace prefix of every data source.
    pub fn type_name(&self) -> &'static str {
        PROVIDER_TYPE_NAME
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Provider-level configuration schema.
    pub fn schema(&self) -> Schema {
        Schema::new()
            .with_description("Read-only access to The Movie Database (TMDB).")
            .with_attribute(
                API_KEY_ATTRIBUTE,
                Attribute::optional_string().sensitive().with_description(format!(
                    "TMDB API key. May also be provided via the {API_KEY_ENV} environment variable."
                )),
            )
    }

    /// Resolve the API key and build the shared client.
    ///
    /// `env_value` is the value of `TMDB_KEY` (empty when unset). On any
    /// error diagnostic the provider is left without a client.
    pub fn configure(&mut self, config: &ProviderConfig, env_value: &str) -> Diagnostics {
        info!("Configuring TMDB client");
        self.client = None;

        let (credential, mut diags) = resolve(&config.key, env_value);
        let Some(credential) = credential else {
            return diags;
        };

        debug!(tmdb_apikey = %credential, "Creating TMDB client");
        let (client, build_diags) = build_client(self.factory.as_ref(), &credential);
        diags.append(build_diags);
        if diags.has_error() {
            return diags;
        }

        self.client = client;
        info!(success = true, "Configured TMDB client");
        diags
    }

    /// The shared client, once configured.
    pub fn client(&self) -> Option<ClientHandle> {
        self.client.clone()
    }

    /// Constructors for every data source this provider serves.
    pub fn data_sources(&self) -> Vec<DataSourceFactory> {
        vec![
            MovieDataSource::boxed,
            PopularMoviesDataSource::boxed,
            SearchDataSource::boxed,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::testing::StubCatalog;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tmdb_client::ClientError;
    use tmdb_core::Credential;

    fn stub_provider() -> TmdbProvider {
        TmdbProvider::with_factory("test", |_: &Credential| -> Result<ClientHandle, ClientError> {
            Ok(StubCatalog::default().handle())
        })
    }

    #[test]
    fn metadata() {
        let provider = stub_provider();
        assert_eq!(provider.type_name(), "tmdb");
        assert_eq!(provider.version(), "test");
    }

    #[test]
    fn schema_declares_optional_sensitive_key() {
        let schema = TmdbProvider::new("test").schema();
        let key = schema.attribute("key").unwrap();
        assert!(key.optional);
        assert!(key.sensitive);
        assert!(!key.required);
        assert!(schema.check_consistency().is_empty());
    }

    #[test]
    fn configure_with_declared_key() {
        let mut provider = stub_provider();
        let diags = provider.configure(&ProviderConfig::with_key("abc"), "");
        assert!(diags.is_empty());
        assert!(provider.client().is_some());
    }

    #[test]
    fn configure_passes_resolved_key_to_factory() {
        let seen = Arc::new(std::sync::Mutex::new(String::new()));
        let sink = seen.clone();
        let mut provider = TmdbProvider::with_factory(
            "test",
            move |c: &Credential| -> Result<ClientHandle, ClientError> {
                *sink.lock().unwrap() = c.expose().to_string();
                Ok(StubCatalog::default().handle())
            },
        );

        provider.configure(&ProviderConfig::default(), "from-env");
        assert_eq!(*seen.lock().unwrap(), "from-env");

        provider.configure(&ProviderConfig::with_key("declared"), "from-env");
        assert_eq!(*seen.lock().unwrap(), "declared");
    }

    #[test]
    fn unknown_key_never_builds_client() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = builds.clone();
        let mut provider = TmdbProvider::with_factory(
            "test",
            move |_: &Credential| -> Result<ClientHandle, ClientError> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(StubCatalog::default().handle())
            },
        );

        let config = ProviderConfig {
            key: Value::Unknown,
        };
        let diags = provider.configure(&config, "env-key");
        assert_eq!(diags.len(), 1);
        assert!(provider.client().is_none());
        assert_eq!(builds.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_key_is_one_error() {
        let mut provider = stub_provider();
        let diags = provider.configure(&ProviderConfig::default(), "");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.iter().next().unwrap().summary, "Missing TMDB API Key");
        assert!(provider.client().is_none());
    }

    #[test]
    fn construction_failure_is_one_error() {
        let mut provider = TmdbProvider::new("test");
        let diags = provider.configure(&ProviderConfig::with_key("bad key"), "");
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags.iter().next().unwrap().summary,
            "Unable to Create TMDB API Client"
        );
        assert!(provider.client().is_none());
    }

    #[test]
    fn failed_reconfigure_drops_previous_client() {
        let mut provider = stub_provider();
        provider.configure(&ProviderConfig::with_key("abc"), "");
        assert!(provider.client().is_some());

        provider.configure(&ProviderConfig::default(), "");
        assert!(provider.client().is_none());
    }

    #[test]
    fn serves_three_data_sources() {
        let provider = stub_provider();
        let names: Vec<String> = provider
            .data_sources()
            .iter()
            .map(|new| new().metadata(provider.type_name()))
            .collect();
        assert_eq!(names, ["tmdb_movie", "tmdb_popular_movies", "tmdb_search"]);
    }
}
