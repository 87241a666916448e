//! Unfiltered listing of TMDB's popular movies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tmdb_core::{Attribute, Diagnostic, Error, Schema};

use super::model::{map_movies, movie_list_attributes, MovieModel};
use super::{decode_config, require_client, DataSource, ReadResponse};
use crate::factory::ClientHandle;

#[derive(Debug, Default, Deserialize)]
struct PopularMoviesConfig {}

/// State of the `popular_movies` data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularMoviesState {
    pub movies: Vec<MovieModel>,
}

/// The `popular_movies` data source.
#[derive(Default)]
pub struct PopularMoviesDataSource {
    client: Option<ClientHandle>,
}

impl PopularMoviesDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed() -> Box<dyn DataSource> {
        Box::new(Self::new())
    }
}

#[async_trait]
impl DataSource for PopularMoviesDataSource {
    fn type_suffix(&self) -> &'static str {
        "popular_movies"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_description("Lists the movies currently popular on TMDB.")
            .with_attribute("movies", Attribute::computed_list_nested(movie_list_attributes()))
    }

    fn configure(&mut self, client: Option<ClientHandle>) {
        if client.is_some() {
            self.client = client;
        }
    }

    async fn read(&self, config: &serde_json::Value) -> ReadResponse {
        let schema = self.schema();
        if let Err(diags) = decode_config::<PopularMoviesConfig>(&schema, config) {
            return ReadResponse::failed(diags);
        }
        let client = match require_client(&self.client, self.type_suffix()) {
            Ok(client) => client,
            Err(diags) => return ReadResponse::failed(diags),
        };

        match client.fetch_popular().await {
            Ok(movies) => {
                debug!(count = movies.len(), "Read TMDB popular movies");
                ReadResponse::with_state(
                    &schema,
                    &PopularMoviesState {
                        movies: map_movies(movies),
                    },
                )
            }
            Err(e) => {
                warn!(error = %e, "TMDB popular movies read failed");
                ReadResponse::failed(Diagnostic::from(Error::read("Unable to Read TMDB Movies", e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::testing::{movie, StubCatalog};
    use serde_json::json;

    fn configured(catalog: StubCatalog) -> PopularMoviesDataSource {
        let mut ds = PopularMoviesDataSource::new();
        ds.configure(Some(catalog.handle()));
        ds
    }

    #[test]
    fn metadata_and_schema() {
        let ds = PopularMoviesDataSource::new();
        assert_eq!(ds.metadata("tmdb"), "tmdb_popular_movies");
        assert!(ds.schema().check_consistency().is_empty());
    }

    #[tokio::test]
    async fn maps_every_record_in_order() {
        let ds = configured(StubCatalog::with_movies(vec![
            movie(3, "Gamma"),
            movie(1, "Alpha"),
            movie(2, "Beta"),
        ]));

        let resp = ds.read(&serde_json::Value::Null).await;
        assert!(resp.diagnostics.is_empty());
        let state: PopularMoviesState = serde_json::from_value(resp.state.unwrap()).unwrap();
        let titles: Vec<_> = state.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["Gamma", "Alpha", "Beta"]);
    }

    #[tokio::test]
    async fn empty_list_is_success() {
        let ds = configured(StubCatalog::default());
        let resp = ds.read(&json!({})).await;
        assert!(resp.diagnostics.is_empty());
        assert_eq!(resp.state, Some(json!({ "movies": [] })));
    }

    #[tokio::test]
    async fn collaborator_failure_is_one_error() {
        let ds = configured(StubCatalog::failing("timeout"));
        let resp = ds.read(&json!({})).await;
        assert!(resp.state.is_none());
        assert_eq!(resp.diagnostics.len(), 1);
        assert_eq!(
            resp.diagnostics.iter().next().unwrap().summary,
            "Unable to Read TMDB Movies"
        );
    }

    #[tokio::test]
    async fn setting_computed_movies_is_rejected() {
        let ds = configured(StubCatalog::default());
        let resp = ds.read(&json!({ "movies": [] })).await;
        assert!(resp.has_error());
        assert!(resp.state.is_none());
    }
}
