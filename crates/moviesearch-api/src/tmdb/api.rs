//! `MovieCatalog` trait definition.
#![allow(clippy::future_not_send)]

use super::error::CatalogError;
use super::types::{MoviePage, SearchMovieParams};

/// Movie catalog trait.
///
/// Abstracts the search operation for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait,
/// which is what the search driver needs to spawn requests.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieCatalog: Send)]
pub trait LocalMovieCatalog {
    /// Searches for movies.
    ///
    /// A blank query yields an empty page without contacting the service.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Configuration`] if no API token is configured.
    /// - [`CatalogError::Fetch`] if the HTTP request fails, the status is not
    ///   2xx, or the body does not match the expected schema.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<MoviePage, CatalogError>;
}
