//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 `search/movie` endpoint
//! and resolves poster/backdrop asset URLs.

mod api;
mod client;
mod error;
mod image;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMovieCatalog, MovieCatalog};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use error::CatalogError;
pub use image::{IMAGE_BASE_URL, ImageSize, TMDB_HOME_URL, movie_page_url, poster_url};
pub use types::{Movie, MoviePage, SearchMovieParams};
