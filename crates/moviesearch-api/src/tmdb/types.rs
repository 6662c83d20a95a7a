//! TMDB API response types and search parameters.

use serde::Deserialize;

/// Response language sent with every search.
const SEARCH_LANGUAGE: &str = "en-US";

// --- Search Movie ---

/// Response from `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoviePage {
    /// Current page number.
    pub page: u32,
    /// Search results in provider order.
    pub results: Vec<Movie>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

impl MoviePage {
    /// Returns the page produced for a blank query without asking the API.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

/// A single movie search result.
///
/// Only `id` and `title` are mandatory; the remaining fields feed the
/// detail overlay and may be missing or null in the response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path (e.g. `/abc.jpg`).
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl Movie {
    /// Returns the release year, if the release date carries one.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
    }
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}

// --- Search Parameters ---

/// Parameters for `search/movie` endpoint.
///
/// Language and the adult-content filter are fixed; only the query and
/// page vary between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Response language (always "en-US").
    pub language: &'static str,
    /// Include adult content (always false).
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params for the first page of `query`.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            language: SEARCH_LANGUAGE,
            include_adult: false,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Returns `true` if the query is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Builds the query string pairs sent to the API.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("include_adult", self.include_adult.to_string()),
            ("language", String::from(self.language)),
            ("page", self.page.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_params_defaults() {
        // Arrange & Act
        let params = SearchMovieParams::new("batman");

        // Assert
        assert_eq!(params.page, 1);
        assert_eq!(params.language, "en-US");
        assert!(!params.include_adult);
    }

    #[test]
    fn test_params_to_query() {
        // Arrange
        let params = SearchMovieParams::new("batman").page(3);

        // Act
        let query = params.to_query();

        // Assert
        assert_eq!(
            query,
            vec![
                ("query", String::from("batman")),
                ("include_adult", String::from("false")),
                ("language", String::from("en-US")),
                ("page", String::from("3")),
            ]
        );
    }

    #[test]
    fn test_params_is_blank() {
        assert!(SearchMovieParams::new("").is_blank());
        assert!(SearchMovieParams::new(" \t\n").is_blank());
        assert!(!SearchMovieParams::new(" x ").is_blank());
    }

    #[test]
    fn test_parse_movie_with_nulls_and_unknown_fields() {
        // Arrange
        let json = r#"{
            "id": 268,
            "title": "Batman",
            "poster_path": null,
            "adult": false,
            "genre_ids": [14, 28],
            "popularity": 12.5
        }"#;

        // Act
        let movie: Movie = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.id, 268);
        assert_eq!(movie.title, "Batman");
        assert!(movie.poster_path.is_none());
        assert!(movie.overview.is_none());
        assert!(movie.vote_average.is_none());
    }

    #[test]
    fn test_parse_movie_missing_title_fails() {
        // Arrange
        let json = r#"{"id": 1, "poster_path": "/a.jpg"}"#;

        // Act
        let result: Result<Movie, _> = serde_json::from_str(json);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_release_year() {
        // Arrange
        let mut movie: Movie = serde_json::from_str(r#"{"id": 1, "title": "X"}"#).unwrap();

        // Act & Assert
        assert_eq!(movie.release_year(), None);

        movie.release_date = Some(String::from("1989-06-21"));
        assert_eq!(movie.release_year(), Some("1989"));

        movie.release_date = Some(String::new());
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn test_empty_page() {
        // Arrange & Act
        let page = MoviePage::empty();

        // Assert
        assert_eq!(page.page, 1);
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_results, 0);
    }
}
