//! TUI rendering logic for the movie search browser.

use moviesearch_api::tmdb::{ImageSize, Movie, TMDB_HOME_URL, poster_url};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap};

use crate::state::{FailureKind, InputMode, Notification, SearchState, SearchView};

/// Placeholder shown instead of a poster URL.
const NO_POSTER: &str = "(no poster)";

/// Draws the browser UI. Returns the main content area height for page size calculation.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &SearchState, toast: Option<Notification>) -> u16 {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);

    match state.view() {
        SearchView::Loading => draw_loading(frame, chunks[1], state),
        SearchView::Failed(kind) => draw_error(frame, chunks[1], kind),
        SearchView::Movies(movies) => draw_movies(frame, chunks[1], state, movies),
    }

    draw_footer(frame, chunks[2], state, toast);

    if let Some(movie) = state.selected() {
        draw_overlay(frame, movie);
    }

    chunks[1].height
}

/// Draws the query input and the attribution.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &SearchState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let editing = state.input_mode == InputMode::Editing;
    let input_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let input_text = if editing {
        format!("{}\u{2588}", state.input)
    } else if state.input.is_empty() {
        String::from("Search movies...")
    } else {
        state.input.clone()
    };

    let input = Paragraph::new(input_text)
        .style(input_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(input, header_chunks[0]);

    let attribution = Paragraph::new("Powered by TMDB")
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" moviesearch ")
                .title_bottom(TMDB_HOME_URL),
        );
    frame.render_widget(attribution, header_chunks[1]);
}

/// Draws the progress indicator.
fn draw_loading(frame: &mut Frame, area: Rect, state: &SearchState) {
    let text = state.last_query().map_or_else(
        || String::from("Loading..."),
        |query| format!("Searching for \"{query}\"..."),
    );
    let loading = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(" Movies "));
    frame.render_widget(loading, area);
}

/// Draws the error surface.
fn draw_error(frame: &mut Frame, area: Rect, kind: FailureKind) {
    let text = match kind {
        FailureKind::Fetch => "There was an error, please try again...",
        FailureKind::Configuration => {
            "TMDB API token is not configured. Set TMDB_API_TOKEN or tmdb.api_token in config.toml."
        }
    };
    let error = Paragraph::new(text)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        );
    frame.render_widget(error, area);
}

/// Draws the result table. An empty result set renders an empty block.
fn draw_movies(frame: &mut Frame, area: Rect, state: &SearchState, movies: &[Movie]) {
    let title = state.last_query().map_or_else(
        || String::from(" Movies "),
        |query| format!(" Movies: \"{query}\" ({}) ", movies.len()),
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if movies.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let header = Row::new(vec!["#", "Title", "Year", "Poster"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = movies
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let poster = poster_url(m.poster_path.as_deref(), ImageSize::W500);
            let style = if poster.is_some() {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Row::new(vec![
                i.saturating_add(1).to_string(),
                m.title.clone(),
                String::from(m.release_year().unwrap_or("--")),
                poster.unwrap_or_else(|| String::from(NO_POSTER)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(45),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let mut table_state = TableState::default().with_selected(Some(state.cursor()));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Draws the detail overlay centered over the main area.
fn draw_overlay(frame: &mut Frame, movie: &Movie) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let label = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let poster = poster_url(movie.poster_path.as_deref(), ImageSize::W500);
    let backdrop = poster_url(movie.backdrop_path.as_deref(), ImageSize::Original);
    let rating = movie
        .vote_average
        .map_or_else(|| String::from("--"), |v| format!("{v:.1}/10"));

    let lines = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Release date: ", label),
            Span::raw(movie.release_date.clone().unwrap_or_else(|| String::from("--"))),
        ]),
        Line::from(vec![Span::styled("Rating: ", label), Span::raw(rating)]),
        Line::from(vec![
            Span::styled("Poster: ", label),
            Span::raw(poster.unwrap_or_else(|| String::from(NO_POSTER))),
        ]),
        Line::from(vec![
            Span::styled("Backdrop: ", label),
            Span::raw(backdrop.unwrap_or_else(|| String::from("--"))),
        ]),
        Line::from(""),
        Line::from(movie.overview.clone().unwrap_or_default()),
    ];

    let overlay = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", movie.id))
            .title_bottom(" Esc: close  o: open on TMDB "),
    );
    frame.render_widget(overlay, area);
}

/// Draws the footer with key hints, or the current notification.
fn draw_footer(frame: &mut Frame, area: Rect, state: &SearchState, toast: Option<Notification>) {
    let text = if let Some(notification) = toast {
        Line::from(Span::styled(
            notification.message(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if state.selected().is_some() {
        Line::from("Esc/Enter: close  o: open on TMDB  Ctrl-C: quit")
    } else {
        match state.input_mode {
            InputMode::Editing => Line::from("Type a query | Enter: search | Esc: browse results"),
            InputMode::Normal => Line::from(
                "/: search  \u{2191}\u{2193}/j/k: move  PgUp/PgDn: page  Enter: details  q: quit",
            ),
        }
    };

    let footer = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Returns a rectangle of the given percentage size centered in `area`.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let percent_x = percent_x.min(100);
    let percent_y = percent_y.min(100);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(100 - percent_x - (100 - percent_x) / 2),
        ])
        .split(area);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage(100 - percent_y - (100 - percent_y) / 2),
        ])
        .split(horizontal[1]);
    vertical[1]
}
