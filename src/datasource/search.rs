//! Movies matching a free-text search query.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tmdb_core::{Attribute, AttributePath, Diagnostic, Error, Schema};

use super::model::{map_movies, movie_list_attributes, MovieModel};
use super::{decode_config, require_client, DataSource, ReadResponse};
use crate::factory::ClientHandle;

#[derive(Debug, Deserialize)]
struct SearchConfig {
    query: String,
}

/// State of the `search` data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    /// The declared query, echoed unchanged.
    pub query: String,
    pub movies: Vec<MovieModel>,
}

/// The `search` data source.
#[derive(Default)]
pub struct SearchDataSource {
    client: Option<ClientHandle>,
}

impl SearchDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed() -> Box<dyn DataSource> {
        Box::new(Self::new())
    }
}

#[async_trait]
impl DataSource for SearchDataSource {
    fn type_suffix(&self) -> &'static str {
        "search"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_description("Searches TMDB for movies by title.")
            .with_attribute(
                "query",
                Attribute::required_string().with_description("Text to search movie titles for."),
            )
            .with_attribute("movies", Attribute::computed_list_nested(movie_list_attributes()))
    }

    fn configure(&mut self, client: Option<ClientHandle>) {
        if client.is_some() {
            self.client = client;
        }
    }

    async fn read(&self, config: &serde_json::Value) -> ReadResponse {
        let schema = self.schema();
        let input: SearchConfig = match decode_config(&schema, config) {
            Ok(input) => input,
            Err(diags) => return ReadResponse::failed(diags),
        };
        if input.query.is_empty() {
            return ReadResponse::failed(Diagnostic::from(Error::invalid_attribute(
                AttributePath::root("query"),
                "Invalid Attribute Value",
                "The search query must not be empty.",
            )));
        }
        let client = match require_client(&self.client, self.type_suffix()) {
            Ok(client) => client,
            Err(diags) => return ReadResponse::failed(diags),
        };

        match client.fetch_by_query(&input.query).await {
            Ok(movies) => {
                debug!(query = %input.query, count = movies.len(), "Read TMDB search results");
                ReadResponse::with_state(
                    &schema,
                    &SearchState {
                        query: input.query,
                        movies: map_movies(movies),
                    },
                )
            }
            Err(e) => {
                warn!(query = %input.query, error = %e, "TMDB search read failed");
                ReadResponse::failed(Diagnostic::from(Error::read(
                    format!("Unable to Read TMDB Movies with query: {}", input.query),
                    e,
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::testing::{movie, StubCatalog};
    use serde_json::json;

    fn configured(catalog: StubCatalog) -> SearchDataSource {
        let mut ds = SearchDataSource::new();
        ds.configure(Some(catalog.handle()));
        ds
    }

    #[test]
    fn metadata_and_schema() {
        let ds = SearchDataSource::new();
        assert_eq!(ds.metadata("tmdb"), "tmdb_search");
        let schema = ds.schema();
        assert!(schema.check_consistency().is_empty());
        assert!(schema.attribute("query").unwrap().required);
    }

    #[tokio::test]
    async fn maps_results_and_echoes_query() {
        let ds = configured(StubCatalog::with_movies(vec![
            movie(438631, "Dune"),
            movie(11, "Star Wars"),
            movie(693134, "Dune: Part Two"),
        ]));

        let resp = ds.read(&json!({ "query": "dune" })).await;
        assert!(resp.diagnostics.is_empty());
        let state: SearchState = serde_json::from_value(resp.state.unwrap()).unwrap();
        assert_eq!(state.query, "dune");
        let ids: Vec<i64> = state.movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, [438631, 693134]);
        assert_eq!(state.movies[1].releasedate, "2021-10-22");
    }

    #[tokio::test]
    async fn no_results_is_success() {
        let ds = configured(StubCatalog::with_movies(vec![movie(1, "Alien")]));
        let resp = ds.read(&json!({ "query": "zzz" })).await;
        assert!(resp.diagnostics.is_empty());
        assert_eq!(resp.state, Some(json!({ "query": "zzz", "movies": [] })));
    }

    #[tokio::test]
    async fn failure_names_query() {
        let ds = configured(StubCatalog::failing("service unavailable"));
        let resp = ds.read(&json!({ "query": "dune" })).await;
        assert!(resp.state.is_none());
        assert_eq!(resp.diagnostics.len(), 1);
        assert_eq!(
            resp.diagnostics.iter().next().unwrap().summary,
            "Unable to Read TMDB Movies with query: dune"
        );
    }

    #[tokio::test]
    async fn empty_query_is_rejected_before_fetch() {
        let catalog = std::sync::Arc::new(StubCatalog::default());
        let handle: ClientHandle = catalog.clone();
        let mut ds = SearchDataSource::new();
        ds.configure(Some(handle));

        let resp = ds.read(&json!({ "query": "" })).await;
        assert!(resp.state.is_none());
        let diag = resp.diagnostics.iter().next().unwrap();
        assert_eq!(diag.path, Some(AttributePath::root("query")));
        assert_eq!(catalog.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn wrong_query_type_is_rejected() {
        let ds = configured(StubCatalog::default());
        let resp = ds.read(&json!({ "query": 42 })).await;
        assert_eq!(
            resp.diagnostics.iter().next().unwrap().summary,
            "Incorrect Attribute Value Type"
        );
    }
}
