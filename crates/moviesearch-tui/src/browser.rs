//! Movie search browser TUI main loop.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use moviesearch_api::tmdb::{MovieCatalog, movie_page_url};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use crate::controller::SearchController;
use crate::state::{InputMode, Notification};
use crate::ui;

/// How long a notification stays in the footer.
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Upper bound on how long the loop waits for a search outcome before
/// checking the keyboard again.
const TICK: Duration = Duration::from_millis(50);

/// Runs the movie search browser until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_search_browser<C>(catalog: C) -> Result<()>
where
    C: MovieCatalog + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut controller = SearchController::new(catalog);

    let result = run_event_loop(&mut terminal, &mut controller).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<C>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut SearchController<C>,
) -> Result<()>
where
    C: MovieCatalog + Sync + 'static,
{
    let mut main_area_height: u16 = 0;
    let mut toast: Option<(Notification, Instant)> = None;

    loop {
        let latest = controller.state_mut().take_notifications().pop();
        toast = next_toast(toast, latest, Instant::now());

        terminal
            .draw(|frame| {
                main_area_height = ui::draw(frame, controller.state(), toast.map(|(n, _)| n));
            })
            .context("failed to draw TUI")?;

        let page_size = usize::from(main_area_height.saturating_sub(4));

        let outcome = tokio::select! {
            outcome = controller.next_outcome() => outcome,
            () = tokio::time::sleep(TICK) => None,
        };
        if let Some(outcome) = outcome {
            controller.apply(outcome);
        }

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            if let Event::Key(key) = event::read().context("failed to read event")?
                && key.kind == KeyEventKind::Press
                && handle_key(controller, key, page_size)
            {
                return Ok(());
            }
        }
    }
}

/// Latches the newest notification and expires the shown one after
/// [`TOAST_DURATION`].
fn next_toast(
    current: Option<(Notification, Instant)>,
    latest: Option<Notification>,
    now: Instant,
) -> Option<(Notification, Instant)> {
    if let Some(notification) = latest {
        return Some((notification, now));
    }
    current.filter(|(_, since)| now.saturating_duration_since(*since) < TOAST_DURATION)
}

/// Routes a key press to the handler for the current mode. Returns `true` to exit.
fn handle_key<C>(controller: &mut SearchController<C>, key: KeyEvent, page_size: usize) -> bool
where
    C: MovieCatalog + Sync + 'static,
{
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if controller.state().selected().is_some() {
        handle_overlay_input(controller, key.code);
        return false;
    }

    match controller.state().input_mode {
        InputMode::Editing => {
            handle_editing_input(controller, key.code);
            false
        }
        InputMode::Normal => handle_normal_input(controller, key.code, page_size),
    }
}

/// Handles key input while the query is being edited.
fn handle_editing_input<C>(controller: &mut SearchController<C>, key: KeyCode)
where
    C: MovieCatalog + Sync + 'static,
{
    match key {
        KeyCode::Esc => {
            controller.state_mut().input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            controller.submit_input();
        }
        KeyCode::Backspace => controller.state_mut().input_pop(),
        KeyCode::Char(c) => controller.state_mut().input_push(c),
        _ => {}
    }
}

/// Handles key input in normal mode. Returns `true` to exit.
fn handle_normal_input<C>(
    controller: &mut SearchController<C>,
    key: KeyCode,
    page_size: usize,
) -> bool
where
    C: MovieCatalog + Sync + 'static,
{
    let state = controller.state_mut();
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/' | 'i') => state.input_mode = InputMode::Editing,
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::PageUp => state.page_up(page_size),
        KeyCode::PageDown => state.page_down(page_size),
        KeyCode::Enter => state.select_current(),
        _ => {}
    }
    false
}

/// Handles key input while the detail overlay is open.
fn handle_overlay_input<C>(controller: &mut SearchController<C>, key: KeyCode)
where
    C: MovieCatalog + Sync + 'static,
{
    match key {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => controller.state_mut().dismiss(),
        KeyCode::Char('o') => {
            if let Some(movie) = controller.state().selected() {
                let url = movie_page_url(movie.id);
                debug!(url = %url, "opening TMDB page");
                let _ = open::that(&url);
            }
        }
        _ => {}
    }
}
