//! # career-quiz
//!
//! A terminal quiz for placement preparation: aptitude, programming, DSA and
//! reasoning questions, generated remotely or drawn from a local bank, answered
//! one at a time under a countdown.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use career_quiz::{QuizConfig, QuizError, SourceMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let config = QuizConfig {
//!         source: SourceMode::Local,
//!         ..QuizConfig::default()
//!     };
//!
//!     career_quiz::run(config).await
//! }
//! ```

mod app;
pub mod config;
mod data;
pub mod models;
pub mod review;
pub mod session;
pub mod sourcing;
pub mod stats;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

pub use app::{App, AppEvent, Screen, SetupForm};
pub use config::{GeminiConfig, QuizConfig, SourceMode};
pub use data::{LoadError, builtin_questions, load_questions_from_json, random_questions};
pub use session::{Phase, QuizSession, TimerEvent};
pub use sourcing::{QuestionService, SourceError, SourcingError};

/// Error type for running the quiz.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error("Failed to set up the question source: {0}")]
    Source(#[from] SourceError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Run the quiz in the terminal until the user quits.
pub async fn run(config: QuizConfig) -> Result<(), QuizError> {
    let bank = match &config.bank_path {
        Some(path) => load_questions_from_json(path)?,
        None => builtin_questions(),
    };
    let service = Arc::new(QuestionService::from_config(&config, bank)?);
    info!(source = ?service.mode(), model = %config.gemini.model, "starting quiz");

    let (app_tx, mut app_rx) = mpsc::unbounded_channel();
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
    let mut app = App::new(&config, service, app_tx, timer_tx);

    let mut tui = terminal::Tui::enter()?;
    run_event_loop(&mut tui, &mut app, &mut app_rx, &mut timer_rx).await
}

async fn run_event_loop(
    terminal: &mut terminal::Tui,
    app: &mut App,
    app_rx: &mut UnboundedReceiver<AppEvent>,
    timer_rx: &mut UnboundedReceiver<TimerEvent>,
) -> Result<(), QuizError> {
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_input(app, key.code) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = timer_rx.recv() => app.handle_timer(event),
            Some(event) = app_rx.recv() => app.handle_app_event(event),
        }
    }

    info!("quiz closed");
    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.screen {
        Screen::Setup => handle_setup_input(app, key),
        Screen::Loading => handle_loading_input(app, key),
        Screen::Quiz => handle_quiz_input(app, key),
        Screen::Results => handle_result_input(app, key),
        Screen::Empty | Screen::Failed => handle_notice_input(app, key),
    }
}

fn handle_setup_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.setup.next_category(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => app.setup.previous_category(),
        KeyCode::Down | KeyCode::Char('j') => app.setup.cursor_down(),
        KeyCode::Up | KeyCode::Char('k') => app.setup.cursor_up(),
        KeyCode::Char(' ') => app.setup.toggle_topic(),
        KeyCode::Char('t') | KeyCode::Char('T') => app.setup.cycle_time(),
        KeyCode::Char('d') | KeyCode::Char('D') => app.setup.cycle_difficulty(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.setup.cycle_count(),
        KeyCode::Enter => app.start_quiz(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        _ => {}
    }
    false
}

fn handle_loading_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc => {
            app.cancel_loading();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.move_option_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_option_down(),
        KeyCode::Char(' ') => app.select_option(),
        KeyCode::Backspace | KeyCode::Char('c') => app.clear_selection(),
        KeyCode::Enter => app.confirm(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.skip_question(),
        KeyCode::Esc => app.quit_quiz(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.results_up(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_details(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.retake(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.new_quiz(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_notice_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter | KeyCode::Esc => {
            app.go_home();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
