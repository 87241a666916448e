//! tmdb-provider - read-only TMDB data sources for a declarative
//! orchestration engine.
//!
//! The provider resolves a TMDB API key, builds one shared client, and
//! serves three data sources (`tmdb_movie`, `tmdb_popular_movies`,
//! `tmdb_search`) that map TMDB records into schema-validated state. Every
//! failure is reported as a diagnostic; nothing is ever written back to
//! TMDB.

pub mod datasource;
pub mod factory;
pub mod host;
pub mod provider;
pub mod resolve;

pub use datasource::{DataSource, ReadResponse};
pub use factory::{ClientFactory, ClientHandle, HttpClientFactory};
pub use host::ProviderHost;
pub use provider::{ProviderConfig, TmdbProvider};
