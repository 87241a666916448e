//! tmdb-client: access to The Movie Database v3 REST API.
//!
//! The provider consumes TMDB only through the [`MovieCatalog`] trait:
//! fetch one movie by ID, list popular movies, or search by title. The
//! [`TmdbClient`] implementation talks HTTP via `reqwest`, with a
//! client-side rate limit from [`governor`]. It never retries; every failure
//! is returned to the caller as a [`ClientError`].

pub mod catalog;
pub mod client;
pub mod error;

pub use catalog::{Movie, MovieCatalog};
pub use client::TmdbClient;
pub use error::ClientError;
