//! # french-quiz
//!
//! A terminal-based AP French practice quiz.
//!
//! The session core (question sampling, choice shuffling, scoring, timer
//! accounting) lives in [`session`] and is plain synchronous state; the
//! terminal layer here owns the event loop and the per-question countdown.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use french_quiz::{Quiz, QuizConfig, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Load the bank and run a timed 5-question session.
//!     let config = QuizConfig {
//!         question_count: Some(5),
//!         timer_enabled: true,
//!         timer_seconds: 15,
//!     };
//!     let quiz = Quiz::from_json("questions.json", config)?;
//!     quiz.run()?;
//!     Ok(())
//! }
//! ```

mod app;
mod data;
mod models;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::App;
pub use data::{duplicate_choice_warnings, load_questions_from_json, parse_questions, LoadError};
pub use models::{AppState, Question, CHOICE_COUNT};
pub use session::{Mode, Outcome, SessionError, SessionState, Summary, Tier};

/// How often the event loop wakes up to service the countdown.
const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Error loading questions from file.
    Load(LoadError),
    /// The configured session does not fit the loaded bank.
    Session(SessionError),
    /// IO error during quiz execution.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Load(e) => write!(f, "failed to load questions: {}", e),
            QuizError::Session(e) => write!(f, "invalid quiz configuration: {}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Load(e) => Some(e),
            QuizError::Session(e) => Some(e),
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for QuizError {
    fn from(err: LoadError) -> Self {
        QuizError::Load(err)
    }
}

impl From<SessionError> for QuizError {
    fn from(err: SessionError) -> Self {
        QuizError::Session(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

/// Recognized session options, before resolution against a loaded bank.
#[derive(Debug, Clone, Copy)]
pub struct QuizConfig {
    /// Questions per session; `None` means the whole bank.
    pub question_count: Option<usize>,
    pub timer_enabled: bool,
    pub timer_seconds: u64,
}

impl QuizConfig {
    fn resolve(&self, bank_len: usize) -> Mode {
        Mode {
            question_count: self.question_count.unwrap_or(bank_len),
            timer_seconds: self.timer_enabled.then_some(self.timer_seconds),
        }
    }
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz from a vector of questions.
    ///
    /// Fails when the bank is smaller than the configured session length, so
    /// a misconfigured quiz never starts.
    pub fn new(questions: Vec<Question>, config: QuizConfig) -> Result<Self, QuizError> {
        let mode = config.resolve(questions.len());
        let app = App::with_questions(questions, mode)?;
        Ok(Self { app })
    }

    /// Load a quiz from a JSON question file.
    pub fn from_json<P: AsRef<Path>>(path: P, config: QuizConfig) -> Result<Self, QuizError> {
        let questions = load_questions_from_json(path)?;
        Self::new(questions, config)
    }

    /// Data-quality warnings for the loaded bank (duplicate choice text).
    pub fn bank_warnings(&self) -> Vec<String> {
        duplicate_choice_warnings(self.app.questions())
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal, displays the quiz UI, and returns when the
    /// user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll instead of blocking so the countdown keeps ticking while the
        // user sits on a question.
        if event::poll(TICK_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_input(app, key.code) {
                    break;
                }
            }
        }

        app.on_tick();
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            false
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            // First press answers, second press moves on.
            if app.current_answered() {
                app.next_question();
            } else {
                app.submit_answer();
            }
            false
        }
        KeyCode::Char('n') | KeyCode::Right => {
            // Skip without answering; the question still counts toward the
            // final denominator.
            app.next_question();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
