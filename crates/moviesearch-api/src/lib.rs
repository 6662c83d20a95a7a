//! API client library for moviesearch.
//!
//! Provides the TMDB movie search client and image URL helpers.

/// TMDB API client.
pub mod tmdb;
