//! Single movie lookup by TMDB identifier.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use tmdb_core::{Attribute, Diagnostic, Error, Schema};

use super::model::MovieModel;
use super::{decode_config, require_client, DataSource, ReadResponse};
use crate::factory::ClientHandle;

#[derive(Debug, Deserialize)]
struct MovieConfig {
    id: i64,
}

/// The `movie` data source.
#[derive(Default)]
pub struct MovieDataSource {
    client: Option<ClientHandle>,
}

impl MovieDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxed constructor for the provider's data source list.
    pub fn boxed() -> Box<dyn DataSource> {
        Box::new(Self::new())
    }
}

#[async_trait]
impl DataSource for MovieDataSource {
    fn type_suffix(&self) -> &'static str {
        "movie"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_description("Fetches a single movie from TMDB by its identifier.")
            .with_attribute(
                "id",
                Attribute::required_int64().with_description("TMDB movie identifier."),
            )
            .with_attribute("title", Attribute::computed_string())
            .with_attribute("overview", Attribute::computed_string())
            .with_attribute("releasedate", Attribute::computed_string())
    }

    fn configure(&mut self, client: Option<ClientHandle>) {
        if client.is_some() {
            self.client = client;
        }
    }

    async fn read(&self, config: &serde_json::Value) -> ReadResponse {
        let schema = self.schema();
        let input: MovieConfig = match decode_config(&schema, config) {
            Ok(input) => input,
            Err(diags) => return ReadResponse::failed(diags),
        };
        let client = match require_client(&self.client, self.type_suffix()) {
            Ok(client) => client,
            Err(diags) => return ReadResponse::failed(diags),
        };

        debug!(id = input.id, "Reading TMDB movie");
        match client.fetch_by_id(input.id).await {
            // The ID is echoed from the fetched record, not from the input.
            Ok(movie) => ReadResponse::with_state(&schema, &MovieModel::from(movie)),
            Err(e) => {
                warn!(id = input.id, error = %e, "TMDB movie read failed");
                ReadResponse::failed(Diagnostic::from(Error::read(
                    format!("Unable to Read TMDB Movie with ID: {}", input.id),
                    e,
                )))
            }
        }
    }
}
