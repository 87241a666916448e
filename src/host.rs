//! In-process adapter implementing the host boundary contract.
//!
//! [`ProviderHost`] drives a [`TmdbProvider`] the way the orchestration
//! engine does: configure the provider once, instantiate every data source
//! and hand it the shared client, then dispatch reads by type name. Reads
//! take `&self`, so the host may run many of them concurrently.
//!
//! # Examples
//!
//! ```rust,ignore
//! use tmdb_provider::host::ProviderHost;
//! use tmdb_provider::provider::{ProviderConfig, TmdbProvider};
//!
//! let mut host = ProviderHost::new(TmdbProvider::new("dev"));
//! let diags = host.configure_from_env(&ProviderConfig::default());
//! let resp = host.read_data_source("tmdb_movie", &serde_json::json!({ "id": 550 })).await;
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use tmdb_core::config::API_KEY_ENV;
use tmdb_core::{Diagnostic, Diagnostics, Error, Schema};

use crate::datasource::{DataSource, ReadResponse};
use crate::factory::ClientHandle;
use crate::provider::{ProviderConfig, TmdbProvider};

/// Provider identity and the data source type names it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    pub type_name: String,
    pub version: String,
    pub data_sources: Vec<String>,
}

/// Every schema the provider declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSchemas {
    pub provider: Schema,
    pub data_sources: BTreeMap<String, Schema>,
}

/// Owns a provider and its data source instances, keyed by type name.
pub struct ProviderHost {
    provider: TmdbProvider,
    data_sources: BTreeMap<String, Box<dyn DataSource>>,
}

impl ProviderHost {
    /// Instantiate every data source. Until [`configure`](Self::configure)
    /// succeeds, reads fail with an "Unconfigured Data Source" diagnostic.
    pub fn new(provider: TmdbProvider) -> Self {
        let data_sources = instantiate(&provider, None);
        Self {
            provider,
            data_sources,
        }
    }

    pub fn provider(&self) -> &TmdbProvider {
        &self.provider
    }

    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: self.provider.type_name().to_string(),
            version: self.provider.version().to_string(),
            data_sources: self.data_sources.keys().cloned().collect(),
        }
    }

    pub fn schemas(&self) -> ProviderSchemas {
        ProviderSchemas {
            provider: self.provider.schema(),
            data_sources: self
                .data_sources
                .iter()
                .map(|(name, ds)| (name.clone(), ds.schema()))
                .collect(),
        }
    }

    /// Configure the provider and re-create every data source with the
    /// resulting client handle.
    pub fn configure(&mut self, config: &ProviderConfig, env_value: &str) -> Diagnostics {
        let diags = self.provider.configure(config, env_value);
        self.data_sources = instantiate(&self.provider, self.provider.client());
        diags
    }

    /// [`configure`](Self::configure) with the `TMDB_KEY` value read from
    /// the process environment.
    pub fn configure_from_env(&mut self, config: &ProviderConfig) -> Diagnostics {
        let env_value = std::env::var(API_KEY_ENV).unwrap_or_default();
        self.configure(config, &env_value)
    }

    /// Check a declared data source configuration without reading.
    pub fn validate_data_source_config(
        &self,
        type_name: &str,
        config: &serde_json::Value,
    ) -> Diagnostics {
        match self.data_sources.get(type_name) {
            Some(ds) => ds.schema().validate_config(config),
            None => Diagnostic::from(Error::UnknownDataSource(type_name.to_string())).into(),
        }
    }

    /// Read the data source registered under `type_name`.
    pub async fn read_data_source(
        &self,
        type_name: &str,
        config: &serde_json::Value,
    ) -> ReadResponse {
        let Some(ds) = self.data_sources.get(type_name) else {
            return ReadResponse::failed(Diagnostic::from(Error::UnknownDataSource(
                type_name.to_string(),
            )));
        };

        debug!(data_source = type_name, "Reading data source");
        ds.read(config).await
    }
}

fn instantiate(
    provider: &TmdbProvider,
    client: Option<ClientHandle>,
) -> BTreeMap<String, Box<dyn DataSource>> {
    provider
        .data_sources()
        .into_iter()
        .map(|new| {
            let mut ds = new();
            ds.configure(client.clone());
            (ds.metadata(provider.type_name()), ds)
        })
        .collect()
}
