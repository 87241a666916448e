//! State models shared by the data sources.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tmdb_client::Movie;
use tmdb_core::Attribute;

/// One movie as stored in state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieModel {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub releasedate: String,
}

impl From<Movie> for MovieModel {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            overview: movie.overview,
            releasedate: movie.release_date,
        }
    }
}

/// Map records 1:1 in collaborator order.
pub fn map_movies(movies: Vec<Movie>) -> Vec<MovieModel> {
    movies.into_iter().map(MovieModel::from).collect()
}

/// Nested attributes of one element of a `movies` list.
pub fn movie_list_attributes() -> BTreeMap<String, Attribute> {
    BTreeMap::from([
        ("id".to_string(), Attribute::computed_int64()),
        ("title".to_string(), Attribute::computed_string()),
        ("overview".to_string(), Attribute::computed_string()),
        ("releasedate".to_string(), Attribute::computed_string()),
    ])
}
