//! Read-only data sources served by the provider.
//!
//! Every data source implements the [`DataSource`] trait: a stable type
//! name, a static [`Schema`], a typed configure step receiving the shared
//! [`ClientHandle`], and an async read that maps TMDB records into a state
//! document.
//!
//! # Module layout
//!
//! - [`model`] -- State models shared by the list-shaped data sources.
//! - [`movie`] -- Single movie lookup by ID.
//! - [`popular_movies`] -- Unfiltered popular movies listing.
//! - [`search`] -- Movies matching a search query.

pub mod model;
pub mod movie;
pub mod popular_movies;
pub mod search;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use tmdb_core::config::PROVIDER_TYPE_NAME;
use tmdb_core::{Diagnostic, Diagnostics, Error, Schema};

use crate::factory::ClientHandle;

pub use movie::MovieDataSource;
pub use popular_movies::PopularMoviesDataSource;
pub use search::SearchDataSource;

// ---------------------------------------------------------------------------
// Read response
// ---------------------------------------------------------------------------

/// Outcome of a single data source read.
///
/// `state` is never set when `diagnostics` contains an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadResponse {
    pub state: Option<serde_json::Value>,
    pub diagnostics: Diagnostics,
}

impl ReadResponse {
    /// A failed read: no state, the given diagnostics.
    pub fn failed(diagnostics: impl Into<Diagnostics>) -> Self {
        Self {
            state: None,
            diagnostics: diagnostics.into(),
        }
    }

    /// A successful read carrying the serialized state model.
    ///
    /// The encoded state is checked against `schema`; a mismatch is
    /// reported instead of handing the host a nonconforming document.
    pub fn with_state<T: Serialize>(schema: &Schema, state: &T) -> Self {
        let value = match serde_json::to_value(state) {
            Ok(value) => value,
            Err(e) => {
                return Self::failed(Diagnostic::error(
                    "Unable to Set State",
                    format!("The read result could not be encoded: {e}"),
                ))
            }
        };

        let diagnostics = schema.validate_state(&value);
        if diagnostics.has_error() {
            return Self::failed(diagnostics);
        }
        Self {
            state: Some(value),
            diagnostics,
        }
    }

    pub fn has_error(&self) -> bool {
        self.diagnostics.has_error()
    }
}

// ---------------------------------------------------------------------------
// Data source trait
// ---------------------------------------------------------------------------

/// Shared contract of every data source.
///
/// Implementations hold no mutable state after [`configure`](Self::configure),
/// so concurrent reads through `&self` are safe.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Per-variant suffix appended to the provider's type name.
    fn type_suffix(&self) -> &'static str;

    /// Stable type name: `provider_type_name + "_" + suffix`.
    fn metadata(&self, provider_type_name: &str) -> String {
        type_name(provider_type_name, self.type_suffix())
    }

    /// Static description of accepted input and produced output.
    fn schema(&self) -> Schema;

    /// Store the provider's client for later reads. `None` means the
    /// provider is not configured yet and is a no-op.
    fn configure(&mut self, client: Option<ClientHandle>);

    /// Fetch and map the remote records for the declared `config`.
    async fn read(&self, config: &serde_json::Value) -> ReadResponse;
}

/// Constructor registered with the provider for each data source variant.
pub type DataSourceFactory = fn() -> Box<dyn DataSource>;

/// Join a provider prefix and a data source suffix.
pub fn type_name(provider_type_name: &str, suffix: &str) -> String {
    format!("{provider_type_name}_{suffix}")
}

// ---------------------------------------------------------------------------
// Shared read helpers
// ---------------------------------------------------------------------------

/// Validate `config` against `schema`, then decode it into the typed input
/// model. A `null` config decodes as an empty object.
pub(crate) fn decode_config<T: DeserializeOwned>(
    schema: &Schema,
    config: &serde_json::Value,
) -> Result<T, Diagnostics> {
    let diags = schema.validate_config(config);
    if diags.has_error() {
        return Err(diags);
    }

    let document = if config.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        config.clone()
    };

    serde_json::from_value(document).map_err(|e| {
        Diagnostics::from(Diagnostic::from(Error::invalid_config(
            "Invalid Configuration",
            format!("The declared configuration could not be decoded: {e}"),
        )))
    })
}

/// The configured client, or the diagnostic for a read before configure.
pub(crate) fn require_client<'a>(
    client: &'a Option<ClientHandle>,
    suffix: &str,
) -> Result<&'a ClientHandle, Diagnostics> {
    client.as_ref().ok_or_else(|| {
        Diagnostics::from(Diagnostic::from(Error::Unconfigured(type_name(
            PROVIDER_TYPE_NAME,
            suffix,
        ))))
    })
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory catalog used by the data source tests.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use tmdb_client::{ClientError, Movie, MovieCatalog};

    use crate::factory::ClientHandle;

    pub fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: format!("Overview of {title}"),
            release_date: "2021-10-22".to_string(),
        }
    }

    /// Catalog serving fixed records, or failing every call.
    #[derive(Default)]
    pub struct StubCatalog {
        pub movies: Vec<Movie>,
        pub fail_with: Option<String>,
        pub calls: AtomicUsize,
    }

    impl StubCatalog {
        pub fn with_movies(movies: Vec<Movie>) -> Self {
            Self {
                movies,
                ..Self::default()
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::default()
            }
        }

        pub fn handle(self) -> ClientHandle {
            Arc::new(self)
        }

        fn check(&self) -> Result<(), ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(message) => Err(ClientError::Status {
                    status: 500,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl MovieCatalog for StubCatalog {
        async fn fetch_by_id(&self, id: i64) -> Result<Movie, ClientError> {
            self.check()?;
            self.movies
                .iter()
                .find(|m| m.id == id)
                .cloned()
                .ok_or_else(|| ClientError::Status {
                    status: 404,
                    message: "The resource you requested could not be found.".into(),
                })
        }

        async fn fetch_popular(&self) -> Result<Vec<Movie>, ClientError> {
            self.check()?;
            Ok(self.movies.clone())
        }

        async fn fetch_by_query(&self, query: &str) -> Result<Vec<Movie>, ClientError> {
            self.check()?;
            let needle = query.to_lowercase();
            Ok(self
                .movies
                .iter()
                .filter(|m| m.title.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }
    }
}
