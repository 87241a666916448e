//! The remote movie catalog capability and its record type.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ClientError;

/// One movie as returned by TMDB.
///
/// Missing or `null` text fields are mapped to the empty string so every
/// record carries all four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub overview: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub release_date: String,
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Async trait over the three TMDB reads the provider needs.
///
/// Implementations must be safe for concurrent use through a shared
/// reference: the provider hands one instance to every data source.
/// Lists are returned in TMDB's response order.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Fetch a single movie by its TMDB identifier.
    async fn fetch_by_id(&self, id: i64) -> Result<Movie, ClientError>;

    /// Fetch the current list of popular movies.
    async fn fetch_popular(&self) -> Result<Vec<Movie>, ClientError>;

    /// Search movies by free-text title query.
    async fn fetch_by_query(&self, query: &str) -> Result<Vec<Movie>, ClientError>;
}
