use std::time::{Duration, Instant};

use crate::models::{AppState, Question, CHOICE_COUNT};
use crate::session::{Mode, Outcome, SessionError, SessionQuestion, SessionState, Summary};

/// How long expiry feedback stays on screen before auto-advancing.
const EXPIRY_PAUSE: Duration = Duration::from_secs(1);

/// Presentation-layer state machine.
///
/// Owns the question bank, the live [`SessionState`], and the countdown
/// scheduling. At most one timer is pending at a time: the deadline is
/// cleared the moment an answer is accepted, on advance, and on restart.
pub struct App {
    pub state: AppState,
    questions: Vec<Question>,
    mode: Mode,
    session: SessionState,
    selected_option: usize,
    feedback: Option<Outcome>,
    summary: Option<Summary>,
    result_scroll: usize,
    /// When the current question's countdown runs out.
    deadline: Option<Instant>,
    /// When to auto-advance after expiry feedback.
    advance_at: Option<Instant>,
}

impl App {
    /// Build the app and validate the mode against the bank. Fails with
    /// [`SessionError::InsufficientQuestions`] when the bank is too small
    /// for the requested session length.
    pub fn with_questions(questions: Vec<Question>, mode: Mode) -> Result<Self, SessionError> {
        let session = SessionState::start(&questions, mode, &mut rand::thread_rng())?;

        Ok(Self {
            state: AppState::Welcome,
            questions,
            mode,
            session,
            selected_option: 0,
            feedback: None,
            summary: None,
            result_scroll: 0,
            deadline: None,
            advance_at: None,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn current_question(&self) -> Option<&SessionQuestion> {
        self.session.current()
    }

    pub fn current_question_number(&self) -> usize {
        self.session.position() + 1
    }

    pub fn total_questions(&self) -> usize {
        self.session.len()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn feedback(&self) -> Option<&Outcome> {
        self.feedback.as_ref()
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Whole seconds left on the current countdown, if one is running.
    pub fn remaining_seconds(&self) -> Option<u64> {
        let deadline = self.deadline?;
        let left = deadline.saturating_duration_since(Instant::now());
        Some(left.as_millis().div_ceil(1000) as u64)
    }

    pub fn current_answered(&self) -> bool {
        self.session.is_answered()
    }

    pub fn select_next_option(&mut self) {
        self.selected_option = (self.selected_option + 1) % CHOICE_COUNT;
    }

    pub fn select_previous_option(&mut self) {
        self.selected_option = (self.selected_option + CHOICE_COUNT - 1) % CHOICE_COUNT;
    }

    pub fn start_quiz(&mut self) {
        self.state = AppState::Quiz;
        self.arm_timer();
    }

    /// Submit the highlighted choice for the current question.
    ///
    /// Cancels the pending countdown first, so an expiry can never fire for
    /// a question that was answered in time.
    pub fn submit_answer(&mut self) {
        if self.session.is_complete() || self.session.is_answered() {
            return;
        }
        self.deadline = None;
        if let Ok(outcome) = self.session.submit_answer(self.selected_option) {
            self.feedback = Some(outcome);
        }
    }

    /// Move to the next question, or to the results screen when the session
    /// is exhausted.
    pub fn next_question(&mut self) {
        self.deadline = None;
        self.advance_at = None;
        self.feedback = None;
        self.selected_option = 0;

        if self.session.advance().is_err() || self.session.is_complete() {
            self.finish();
        } else {
            self.arm_timer();
        }
    }

    /// Countdown/auto-advance bookkeeping, called once per event-loop tick.
    pub fn on_tick(&mut self) {
        if self.state != AppState::Quiz {
            return;
        }
        let now = Instant::now();

        if let Some(at) = self.advance_at {
            if now >= at {
                self.next_question();
            }
            return;
        }

        if let Some(deadline) = self.deadline {
            if now >= deadline {
                self.deadline = None;
                if let Some(outcome) = self.session.expire_timer() {
                    self.feedback = Some(outcome);
                }
                self.advance_at = Some(now + EXPIRY_PAUSE);
            }
        }
    }

    pub fn scroll_results_down(&mut self) {
        if self.result_scroll + 1 < self.session.len() {
            self.result_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Discard the session and draw a fresh one with the same mode.
    pub fn restart(&mut self) {
        // The mode was validated against the bank when the app was built, so
        // a fresh draw with the same inputs cannot fail.
        if let Ok(session) = SessionState::start(&self.questions, self.mode, &mut rand::thread_rng())
        {
            self.session = session;
        }
        self.state = AppState::Welcome;
        self.selected_option = 0;
        self.feedback = None;
        self.summary = None;
        self.result_scroll = 0;
        self.deadline = None;
        self.advance_at = None;
    }

    fn finish(&mut self) {
        self.summary = Some(self.session.finish());
        self.state = AppState::Result;
    }

    fn arm_timer(&mut self) {
        self.deadline = self
            .mode
            .timer_seconds
            .map(|seconds| Instant::now() + Duration::from_secs(seconds));
    }
}
