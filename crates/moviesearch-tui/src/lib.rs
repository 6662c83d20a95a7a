//! Terminal UI for searching The Movie Database.
//!
//! [`state`] holds the search/display state machine, [`controller`] drives
//! it against a [`moviesearch_api::tmdb::MovieCatalog`], and
//! [`run_search_browser`] puts both behind a crossterm terminal.

mod browser;
pub mod controller;
pub mod state;
mod ui;

pub use browser::run_search_browser;
