//! Search state machine.
//!
//! Owns the current phase (`Idle`, `Loading`, `Results`, `Empty`, `Error`),
//! the orthogonal detail overlay, the query input and the transient
//! notification queue. It performs no I/O: a submission hands out a
//! [`SearchTicket`] and the caller feeds the outcome back via
//! [`SearchState::complete`].

use std::collections::VecDeque;

use moviesearch_api::tmdb::{CatalogError, Movie, MoviePage};

/// Classification of a failed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network error, non-2xx response, or malformed body.
    Fetch,
    /// No API token configured.
    Configuration,
}

impl From<&CatalogError> for FailureKind {
    fn from(err: &CatalogError) -> Self {
        match err {
            CatalogError::Configuration => Self::Configuration,
            CatalogError::Fetch { .. } => Self::Fetch,
        }
    }
}

/// Transient user-facing message emitted by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// A blank query was submitted.
    EmptyQuery,
    /// The search succeeded with zero results.
    NoResults,
    /// The search failed.
    RequestFailed,
    /// The search could not start because no API token is configured.
    MissingCredential,
}

impl Notification {
    /// Returns the text shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyQuery => "Please enter your search query.",
            Self::NoResults => "No movies found for your request.",
            Self::RequestFailed => "Something went wrong. Please try again.",
            Self::MissingCredential => {
                "TMDB token is missing. Please set TMDB_API_TOKEN in your environment."
            }
        }
    }
}

/// Search phase.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPhase {
    /// Nothing searched yet.
    Idle,
    /// A search is in flight.
    Loading,
    /// The last search returned at least one movie (provider order).
    Results(Vec<Movie>),
    /// The last search returned no movies.
    Empty,
    /// The last search failed.
    Error(FailureKind),
}

/// What the main area should render, derived from the phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchView<'a> {
    /// Progress indicator only.
    Loading,
    /// Error surface only.
    Failed(FailureKind),
    /// Result surface; an empty slice renders nothing.
    Movies(&'a [Movie]),
}

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Result navigation mode.
    Normal,
    /// Query text input mode.
    Editing,
}

/// Handle for one accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    /// Sequence number; only the latest ticket's outcome is applied.
    pub seq: u64,
    /// Trimmed query text.
    pub query: String,
}

/// State for the movie search browser.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchState {
    /// Current phase.
    phase: SearchPhase,
    /// Movie shown in the detail overlay.
    selected: Option<Movie>,
    /// Query text being edited.
    pub input: String,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Cursor position in the result list.
    cursor: usize,
    /// Sequence number of the most recent ticket (0 = none issued).
    latest_seq: u64,
    /// Query of the most recent ticket.
    last_query: Option<String>,
    /// Pending notifications, oldest first.
    notifications: VecDeque<Notification>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    /// Creates an idle state with the query input focused.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: SearchPhase::Idle,
            selected: None,
            input: String::new(),
            input_mode: InputMode::Editing,
            cursor: 0,
            latest_seq: 0,
            last_query: None,
            notifications: VecDeque::new(),
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    /// Returns `true` while the latest search is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, SearchPhase::Loading)
    }

    /// Returns the rendering decision for the main area.
    #[must_use]
    pub fn view(&self) -> SearchView<'_> {
        match &self.phase {
            SearchPhase::Loading => SearchView::Loading,
            SearchPhase::Error(kind) => SearchView::Failed(*kind),
            SearchPhase::Results(_) | SearchPhase::Empty | SearchPhase::Idle => {
                SearchView::Movies(self.movies())
            }
        }
    }

    /// Returns the current result set (empty unless in `Results`).
    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        match &self.phase {
            SearchPhase::Results(movies) => movies.as_slice(),
            _ => &[],
        }
    }

    /// Returns the movie shown in the overlay, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&Movie> {
        self.selected.as_ref()
    }

    /// Returns the cursor position in the result list.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the movie under the cursor.
    #[must_use]
    pub fn current_movie(&self) -> Option<&Movie> {
        self.movies().get(self.cursor)
    }

    /// Returns the query of the most recent accepted submission.
    #[must_use]
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Submits a query.
    ///
    /// A blank query leaves the state untouched and queues
    /// [`Notification::EmptyQuery`]. Otherwise the previous results and error
    /// are dropped, the phase becomes `Loading` and a ticket is returned.
    /// Submitting while already loading supersedes the earlier ticket.
    pub fn submit(&mut self, raw: &str) -> Option<SearchTicket> {
        let query = raw.trim();
        if query.is_empty() {
            self.notify(Notification::EmptyQuery);
            return None;
        }

        self.latest_seq = self.latest_seq.saturating_add(1);
        self.phase = SearchPhase::Loading;
        self.cursor = 0;
        self.last_query = Some(String::from(query));

        tracing::debug!(seq = self.latest_seq, query, "search submitted");

        Some(SearchTicket {
            seq: self.latest_seq,
            query: String::from(query),
        })
    }

    /// Submits the current input text.
    ///
    /// On acceptance the input is cleared and the mode returns to `Normal`;
    /// a blank input keeps editing.
    pub fn submit_input(&mut self) -> Option<SearchTicket> {
        let input = std::mem::take(&mut self.input);
        let ticket = self.submit(&input);
        if ticket.is_some() {
            self.input_mode = InputMode::Normal;
        } else {
            self.input = input;
        }
        ticket
    }

    /// Applies the outcome of the search identified by `seq`.
    ///
    /// Outcomes of superseded tickets are discarded.
    pub fn complete(&mut self, seq: u64, result: Result<MoviePage, CatalogError>) {
        if seq != self.latest_seq || !self.is_loading() {
            tracing::debug!(seq, latest = self.latest_seq, "discarding stale search response");
            return;
        }

        match result {
            Ok(page) if page.results.is_empty() => {
                tracing::debug!(seq, "search returned no movies");
                self.phase = SearchPhase::Empty;
                self.notify(Notification::NoResults);
            }
            Ok(page) => {
                tracing::debug!(seq, count = page.results.len(), "search returned movies");
                self.phase = SearchPhase::Results(page.results);
                self.cursor = 0;
            }
            Err(err) => {
                tracing::debug!(seq, error = %err, "search failed");
                let kind = FailureKind::from(&err);
                self.phase = SearchPhase::Error(kind);
                self.notify(match kind {
                    FailureKind::Fetch => Notification::RequestFailed,
                    FailureKind::Configuration => Notification::MissingCredential,
                });
            }
        }
    }

    /// Opens the overlay for `movie`, regardless of the phase.
    pub fn select(&mut self, movie: Movie) {
        self.selected = Some(movie);
    }

    /// Opens the overlay for the movie under the cursor.
    pub fn select_current(&mut self) {
        if let Some(movie) = self.current_movie().cloned() {
            self.select(movie);
        }
    }

    /// Closes the overlay without touching the phase.
    pub fn dismiss(&mut self) {
        self.selected = None;
    }

    /// Moves the cursor up.
    pub const fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor down.
    pub fn move_down(&mut self) {
        if self.cursor.saturating_add(1) < self.movies().len() {
            self.cursor = self.cursor.saturating_add(1);
        }
    }

    /// Moves the cursor up by one page.
    pub const fn page_up(&mut self, page_size: usize) {
        self.cursor = self.cursor.saturating_sub(page_size);
    }

    /// Moves the cursor down by one page.
    pub fn page_down(&mut self, page_size: usize) {
        let last = self.movies().len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add(page_size).min(last);
    }

    /// Appends a character to the query input.
    pub fn input_push(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Removes the last character from the query input.
    pub fn input_pop(&mut self) {
        self.input.pop();
    }

    /// Drains pending notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: String::from(title),
            poster_path: Some(format!("/{id}.jpg")),
            backdrop_path: None,
            overview: None,
            release_date: None,
            vote_average: None,
        }
    }

    fn page(movies: Vec<Movie>) -> MoviePage {
        MoviePage {
            page: 1,
            total_pages: u32::from(!movies.is_empty()),
            total_results: u32::try_from(movies.len()).unwrap(),
            results: movies,
        }
    }

    fn fetch_error() -> CatalogError {
        CatalogError::Fetch {
            reason: String::from("TMDB API error (HTTP 500 Internal Server Error): oops"),
        }
    }

    fn loaded_state(movies: Vec<Movie>) -> SearchState {
        let mut state = SearchState::new();
        let ticket = state.submit("batman").unwrap();
        state.complete(ticket.seq, Ok(page(movies)));
        state.take_notifications();
        state
    }

    #[test]
    fn test_initial_state() {
        // Arrange & Act
        let state = SearchState::new();

        // Assert
        assert_eq!(state.phase(), &SearchPhase::Idle);
        assert_eq!(state.view(), SearchView::Movies(&[]));
        assert_eq!(state.input_mode, InputMode::Editing);
        assert!(state.selected().is_none());
        assert!(state.last_query().is_none());
    }

    #[test]
    fn test_submit_trims_and_enters_loading() {
        // Arrange
        let mut state = SearchState::new();

        // Act
        let ticket = state.submit("  batman \n").unwrap();

        // Assert
        assert_eq!(ticket.query, "batman");
        assert_eq!(ticket.seq, 1);
        assert_eq!(state.phase(), &SearchPhase::Loading);
        assert_eq!(state.view(), SearchView::Loading);
        assert_eq!(state.last_query(), Some("batman"));
        assert!(state.take_notifications().is_empty());
    }

    #[test]
    fn test_submit_blank_is_rejected() {
        for raw in ["", "   ", "\t\n"] {
            // Arrange
            let mut state = SearchState::new();

            // Act
            let ticket = state.submit(raw);

            // Assert
            assert!(ticket.is_none());
            assert_eq!(state.phase(), &SearchPhase::Idle);
            assert_eq!(state.take_notifications(), vec![Notification::EmptyQuery]);
        }
    }

    #[test]
    fn test_submit_blank_keeps_previous_results() {
        // Arrange
        let mut state = loaded_state(vec![movie(1, "A")]);

        // Act
        let ticket = state.submit(" ");

        // Assert
        assert!(ticket.is_none());
        assert_eq!(state.movies().len(), 1);
    }

    #[test]
    fn test_submit_clears_previous_results_immediately() {
        // Arrange
        let mut state = loaded_state(vec![movie(1, "A"), movie(2, "B")]);

        // Act
        state.submit("joker").unwrap();

        // Assert
        assert!(state.movies().is_empty());
        assert_eq!(state.view(), SearchView::Loading);
    }

    #[test]
    fn test_submit_clears_previous_error() {
        // Arrange
        let mut state = SearchState::new();
        let ticket = state.submit("batman").unwrap();
        state.complete(ticket.seq, Err(fetch_error()));

        // Act
        state.submit("batman").unwrap();

        // Assert
        assert_eq!(state.phase(), &SearchPhase::Loading);
    }

    #[test]
    fn test_success_with_movies_keeps_provider_order() {
        // Arrange
        let mut state = SearchState::new();
        let ticket = state.submit("batman").unwrap();
        let movies = vec![movie(268, "Batman"), movie(414_906, "The Batman")];

        // Act
        state.complete(ticket.seq, Ok(page(movies.clone())));

        // Assert
        assert_eq!(state.phase(), &SearchPhase::Results(movies.clone()));
        assert_eq!(state.view(), SearchView::Movies(&movies));
        assert!(state.take_notifications().is_empty());
    }

    #[test]
    fn test_success_without_movies_is_empty() {
        // Arrange
        let mut state = SearchState::new();
        let ticket = state.submit("zzzzqqqq").unwrap();

        // Act
        state.complete(ticket.seq, Ok(page(Vec::new())));

        // Assert
        assert_eq!(state.phase(), &SearchPhase::Empty);
        assert_eq!(state.view(), SearchView::Movies(&[]));
        assert_eq!(state.take_notifications(), vec![Notification::NoResults]);
        assert_eq!(
            Notification::NoResults.message(),
            "No movies found for your request."
        );
    }

    #[test]
    fn test_fetch_failure_is_error() {
        // Arrange
        let mut state = SearchState::new();
        let ticket = state.submit("batman").unwrap();

        // Act
        state.complete(ticket.seq, Err(fetch_error()));

        // Assert
        assert_eq!(state.phase(), &SearchPhase::Error(FailureKind::Fetch));
        assert_eq!(state.view(), SearchView::Failed(FailureKind::Fetch));
        assert!(state.movies().is_empty());
        assert_eq!(state.take_notifications(), vec![Notification::RequestFailed]);
    }

    #[test]
    fn test_configuration_failure_is_distinct() {
        // Arrange
        let mut state = SearchState::new();
        let ticket = state.submit("batman").unwrap();

        // Act
        state.complete(ticket.seq, Err(CatalogError::Configuration));

        // Assert
        assert_eq!(
            state.phase(),
            &SearchPhase::Error(FailureKind::Configuration)
        );
        assert_eq!(
            state.take_notifications(),
            vec![Notification::MissingCredential]
        );
    }

    #[test]
    fn test_stale_response_is_discarded() {
        // Arrange
        let mut state = SearchState::new();
        let first = state.submit("batman").unwrap();
        let second = state.submit("joker").unwrap();

        // Act: the newer search answers first, then the older one
        state.complete(second.seq, Ok(page(vec![movie(475_557, "Joker")])));
        state.complete(first.seq, Err(fetch_error()));

        // Assert
        assert_eq!(state.movies().len(), 1);
        assert_eq!(state.movies()[0].title, "Joker");
        assert!(state.take_notifications().is_empty());
    }

    #[test]
    fn test_stale_response_while_loading_keeps_loading() {
        // Arrange
        let mut state = SearchState::new();
        let first = state.submit("batman").unwrap();
        state.submit("joker").unwrap();

        // Act
        state.complete(first.seq, Ok(page(vec![movie(268, "Batman")])));

        // Assert
        assert_eq!(state.phase(), &SearchPhase::Loading);
    }

    #[test]
    fn test_stale_response_is_logged() {
        // Arrange
        let mut state = SearchState::new();
        let first = state.submit("batman").unwrap();
        state.submit("joker").unwrap();

        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().at_level(tracing::Level::DEBUG))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            state.complete(first.seq, Ok(page(Vec::new())));
        });

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_select_and_dismiss_in_every_phase() {
        let phases: Vec<SearchState> = vec![
            SearchState::new(),
            {
                let mut s = SearchState::new();
                s.submit("batman").unwrap();
                s
            },
            loaded_state(vec![movie(1, "A")]),
            loaded_state(Vec::new()),
            {
                let mut s = SearchState::new();
                let t = s.submit("batman").unwrap();
                s.complete(t.seq, Err(fetch_error()));
                s
            },
        ];

        for mut state in phases {
            // Arrange
            let before = state.phase().clone();

            // Act
            state.select(movie(42, "Selected"));

            // Assert
            assert_eq!(state.selected().map(|m| m.id), Some(42));
            assert_eq!(state.phase(), &before);

            // Act
            state.dismiss();

            // Assert
            assert!(state.selected().is_none());
            assert_eq!(state.phase(), &before);
        }
    }

    #[test]
    fn test_selection_survives_new_search() {
        // Arrange
        let mut state = loaded_state(vec![movie(1, "A"), movie(2, "B")]);
        state.move_down();
        state.select_current();

        // Act
        state.submit("joker").unwrap();

        // Assert
        assert_eq!(state.selected().map(|m| m.id), Some(2));
        assert!(state.movies().is_empty());
    }

    #[test]
    fn test_select_current_without_results_is_noop() {
        // Arrange
        let mut state = SearchState::new();

        // Act
        state.select_current();

        // Assert
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_cursor_navigation() {
        // Arrange
        let mut state = loaded_state(vec![movie(1, "A"), movie(2, "B"), movie(3, "C")]);

        // Act & Assert
        state.move_down();
        state.move_down();
        assert_eq!(state.cursor(), 2);

        state.move_down(); // should stay at 2
        assert_eq!(state.cursor(), 2);
        assert_eq!(state.current_movie().map(|m| m.id), Some(3));

        state.page_up(10);
        assert_eq!(state.cursor(), 0);

        state.move_up(); // should stay at 0
        assert_eq!(state.cursor(), 0);

        state.page_down(10);
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_cursor_resets_on_new_results() {
        // Arrange
        let mut state = loaded_state(vec![movie(1, "A"), movie(2, "B")]);
        state.move_down();

        // Act
        let ticket = state.submit("joker").unwrap();
        state.complete(ticket.seq, Ok(page(vec![movie(3, "C"), movie(4, "D")])));

        // Assert
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_submit_input_clears_input_and_leaves_editing() {
        // Arrange
        let mut state = SearchState::new();
        for ch in " batman ".chars() {
            state.input_push(ch);
        }

        // Act
        let ticket = state.submit_input().unwrap();

        // Assert
        assert_eq!(ticket.query, "batman");
        assert!(state.input.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_submit_input_blank_keeps_editing() {
        // Arrange
        let mut state = SearchState::new();
        state.input_push(' ');

        // Act
        let ticket = state.submit_input();

        // Assert
        assert!(ticket.is_none());
        assert_eq!(state.input, " ");
        assert_eq!(state.input_mode, InputMode::Editing);
        assert_eq!(state.take_notifications(), vec![Notification::EmptyQuery]);
    }

    #[test]
    fn test_input_pop() {
        // Arrange
        let mut state = SearchState::new();
        state.input_push('a');
        state.input_push('b');

        // Act
        state.input_pop();

        // Assert
        assert_eq!(state.input, "a");
    }
}
