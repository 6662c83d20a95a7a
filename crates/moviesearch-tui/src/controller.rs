//! Async search driver.
//!
//! Connects the [`SearchState`] machine to a [`MovieCatalog`]: each accepted
//! submission spawns one request task, and its outcome comes back through an
//! unbounded channel to be applied on the event loop.

use std::sync::Arc;

use moviesearch_api::tmdb::{CatalogError, MovieCatalog, MoviePage, SearchMovieParams};
use tokio::sync::mpsc;

use crate::state::{SearchState, SearchTicket};

/// Outcome of one spawned search.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Ticket sequence number the outcome belongs to.
    pub seq: u64,
    /// Catalog result.
    pub result: Result<MoviePage, CatalogError>,
}

/// Owns the search state and dispatches catalog requests.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchController<C> {
    state: SearchState,
    catalog: Arc<C>,
    outcome_tx: mpsc::UnboundedSender<SearchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SearchOutcome>,
}

impl<C> SearchController<C>
where
    C: MovieCatalog + Sync + 'static,
{
    /// Creates a controller in the idle state.
    pub fn new(catalog: C) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state: SearchState::new(),
            catalog: Arc::new(catalog),
            outcome_tx,
            outcome_rx,
        }
    }

    /// Returns the search state.
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Returns the search state for input handling.
    pub const fn state_mut(&mut self) -> &mut SearchState {
        &mut self.state
    }

    /// Submits `raw` and spawns the request if the query is accepted.
    ///
    /// Returns `false` for a blank query (no request is made).
    pub fn submit(&mut self, raw: &str) -> bool {
        let ticket = self.state.submit(raw);
        self.dispatch(ticket)
    }

    /// Submits the state's input text; see [`SearchState::submit_input`].
    pub fn submit_input(&mut self) -> bool {
        let ticket = self.state.submit_input();
        self.dispatch(ticket)
    }

    /// Waits for the next finished request.
    ///
    /// Never yields `None` while the controller is alive, since it holds a
    /// sender itself.
    pub async fn next_outcome(&mut self) -> Option<SearchOutcome> {
        self.outcome_rx.recv().await
    }

    /// Applies a finished request to the state.
    pub fn apply(&mut self, outcome: SearchOutcome) {
        self.state.complete(outcome.seq, outcome.result);
    }

    /// Applies outcomes until the latest search has finished.
    pub async fn settle(&mut self) {
        while self.state.is_loading() {
            let Some(outcome) = self.next_outcome().await else {
                break;
            };
            self.apply(outcome);
        }
    }

    fn dispatch(&self, ticket: Option<SearchTicket>) -> bool {
        let Some(ticket) = ticket else {
            return false;
        };

        let catalog = Arc::clone(&self.catalog);
        let outcome_tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let params = SearchMovieParams::new(ticket.query);
            let result = catalog.search_movie(&params).await;
            // Receiver is gone once the browser has exited.
            let _ = outcome_tx.send(SearchOutcome {
                seq: ticket.seq,
                result,
            });
        });
        true
    }
}
