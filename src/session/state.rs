use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Question, CHOICE_COUNT};
use crate::session::{SessionError, Summary};

/// Session-mode configuration: how many questions to draw from the bank and
/// how long the display layer gives the user per question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    pub question_count: usize,
    /// Seconds per question, or `None` when the timer is disabled.
    pub timer_seconds: Option<u64>,
}

impl Mode {
    pub fn untimed(question_count: usize) -> Self {
        Mode {
            question_count,
            timer_seconds: None,
        }
    }

    pub fn timed(question_count: usize, seconds: u64) -> Self {
        Mode {
            question_count,
            timer_seconds: Some(seconds),
        }
    }
}

/// A recorded answer for one question visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    /// The shuffled choice index picked, or `None` when the timer expired.
    pub choice: Option<usize>,
    pub is_correct: bool,
}

/// Feedback for one submitted answer or timer expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub is_correct: bool,
    pub timed_out: bool,
    pub correct_choice: String,
    pub explanation: String,
}

/// One bank record as presented in a session: the choices are shown in a
/// per-session shuffled order.
///
/// The shuffle permutes choice *positions*, and the correct position is found
/// by following the original answer slot through the permutation. Correctness
/// is never re-derived from choice text, so banks with duplicate choice text
/// still score the designated choice.
pub struct SessionQuestion {
    record: Question,
    /// `slots[i]` is the original choice position shown at position `i`.
    slots: [usize; CHOICE_COUNT],
    /// Position within `slots` holding the record's correct choice.
    correct: usize,
    attempt: Option<Attempt>,
}

impl SessionQuestion {
    fn new<R: Rng>(record: Question, rng: &mut R) -> Self {
        let mut slots = [0, 1, 2, 3];
        slots.shuffle(rng);
        let correct = slots
            .iter()
            .position(|&slot| slot == record.answer)
            .expect("permutation contains every choice slot");

        SessionQuestion {
            record,
            slots,
            correct,
            attempt: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.record.text
    }

    pub fn explanation(&self) -> &str {
        &self.record.explanation
    }

    /// Choice text at a shuffled position.
    pub fn choice(&self, index: usize) -> &str {
        &self.record.choices[self.slots[index]]
    }

    /// Choice texts in shuffled display order.
    pub fn choices(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|&slot| self.record.choices[slot].as_str())
    }

    /// Shuffled position of the correct choice.
    pub fn correct_index(&self) -> usize {
        self.correct
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        self.attempt.as_ref()
    }

    pub fn is_attempted(&self) -> bool {
        self.attempt.is_some()
    }

    fn outcome(&self, is_correct: bool, timed_out: bool) -> Outcome {
        Outcome {
            is_correct,
            timed_out,
            correct_choice: self.choice(self.correct).to_string(),
            explanation: self.record.explanation.clone(),
        }
    }
}

/// Mutable per-run quiz state: the drawn question order, the cursor into it,
/// and the running score.
///
/// The display layer holds the only long-lived reference and drives all
/// transitions synchronously; there is nothing concurrent here.
pub struct SessionState {
    order: Vec<SessionQuestion>,
    position: usize,
    correct_count: usize,
    attempted_count: usize,
    mode: Mode,
}

impl SessionState {
    /// Draw and shuffle a fresh session from the bank.
    ///
    /// With `question_count == bank.len()` every record appears exactly once
    /// in a uniform random order. With a smaller count the records are a
    /// uniform sample without replacement, so no question repeats within one
    /// session. Each question's choices are shuffled independently.
    pub fn start<R: Rng>(
        bank: &[Question],
        mode: Mode,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        if mode.question_count > bank.len() {
            return Err(SessionError::InsufficientQuestions {
                requested: mode.question_count,
                available: bank.len(),
            });
        }

        let mut picked: Vec<&Question> = if mode.question_count == bank.len() {
            bank.iter().collect()
        } else {
            bank.choose_multiple(rng, mode.question_count).collect()
        };
        // choose_multiple does not randomize the order of the sample itself.
        picked.shuffle(rng);

        let order = picked
            .into_iter()
            .map(|record| SessionQuestion::new(record.clone(), rng))
            .collect();

        Ok(SessionState {
            order,
            position: 0,
            correct_count: 0,
            attempted_count: 0,
            mode,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of questions in this session.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Zero-based cursor into the question order.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.order.len()
    }

    /// The question currently being presented, if any remain.
    pub fn current(&self) -> Option<&SessionQuestion> {
        self.order.get(self.position)
    }

    /// Whether the current question was already answered in this visit. Also
    /// what keeps a late timer callback from double-counting.
    pub fn is_answered(&self) -> bool {
        self.current().is_some_and(|q| q.is_attempted())
    }

    /// All questions in session order, for the results breakdown.
    pub fn questions(&self) -> &[SessionQuestion] {
        &self.order
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn attempted_count(&self) -> usize {
        self.attempted_count
    }

    /// Record an answer for the current question and return feedback.
    ///
    /// Does not advance the cursor; advancing is a separate explicit step.
    pub fn submit_answer(&mut self, choice: usize) -> Result<Outcome, SessionError> {
        if choice >= CHOICE_COUNT {
            return Err(SessionError::InvalidChoice { index: choice });
        }
        let question = self.order.get_mut(self.position).ok_or(SessionError::Complete)?;
        if question.attempt.is_some() {
            return Err(SessionError::AlreadyAnswered);
        }

        let is_correct = choice == question.correct;
        question.attempt = Some(Attempt {
            choice: Some(choice),
            is_correct,
        });
        self.attempted_count += 1;
        if is_correct {
            self.correct_count += 1;
        }

        Ok(question.outcome(is_correct, false))
    }

    /// Record that the countdown ran out on the current question.
    ///
    /// Counts as attempted but never correct. Returns `None` when the current
    /// question was already answered or the session is complete, so a timer
    /// callback that fires late is harmless.
    pub fn expire_timer(&mut self) -> Option<Outcome> {
        let question = self.order.get_mut(self.position)?;
        if question.attempt.is_some() {
            return None;
        }

        question.attempt = Some(Attempt {
            choice: None,
            is_correct: false,
        });
        self.attempted_count += 1;

        Some(question.outcome(false, true))
    }

    /// Move the cursor to the next question.
    ///
    /// Once the cursor has moved past the last question the session is
    /// terminal; calling `advance` again returns [`SessionError::Complete`].
    pub fn advance(&mut self) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Complete);
        }
        self.position += 1;
        Ok(())
    }

    /// Final score. Questions never attempted still count in the denominator.
    pub fn finish(&self) -> Summary {
        Summary::new(self.correct_count, self.attempted_count, self.order.len())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::session::Tier;

    fn record(text: &str, answer: usize) -> Question {
        Question {
            text: text.to_string(),
            choices: [
                format!("{}-a", text),
                format!("{}-b", text),
                format!("{}-c", text),
                format!("{}-d", text),
            ],
            answer,
            explanation: format!("because {}", text),
        }
    }

    fn bank(size: usize) -> Vec<Question> {
        (0..size).map(|i| record(&format!("q{}", i), i % 4)).collect()
    }

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_full_bank_mode_covers_every_record_once() {
        let bank = bank(20);
        let session = SessionState::start(&bank, Mode::untimed(20), &mut rng(1)).unwrap();

        assert_eq!(session.len(), 20);
        let texts: HashSet<&str> = session.questions().iter().map(|q| q.text()).collect();
        assert_eq!(texts.len(), 20);
        for question in &bank {
            assert!(texts.contains(question.text.as_str()));
        }
    }

    #[test]
    fn test_sampled_mode_draws_distinct_records() {
        let bank = bank(22);
        for seed in 0..20 {
            let session = SessionState::start(&bank, Mode::untimed(5), &mut rng(seed)).unwrap();
            assert_eq!(session.len(), 5);
            let texts: HashSet<&str> = session.questions().iter().map(|q| q.text()).collect();
            assert_eq!(texts.len(), 5, "sample contains a duplicate record");
        }
    }

    #[test]
    fn test_sampled_mode_varies_selection() {
        let bank = bank(22);
        let mut selections = HashSet::new();
        for seed in 0..50 {
            let session = SessionState::start(&bank, Mode::untimed(5), &mut rng(seed)).unwrap();
            let mut texts: Vec<String> =
                session.questions().iter().map(|q| q.text().to_string()).collect();
            texts.sort();
            selections.insert(texts);
        }
        assert!(selections.len() > 1, "sampling always picked the same 5");
    }

    #[test]
    fn test_start_rejects_oversized_request() {
        let bank = bank(5);
        let err = SessionState::start(&bank, Mode::untimed(6), &mut rng(0))
            .err()
            .unwrap();
        assert_eq!(
            err,
            SessionError::InsufficientQuestions {
                requested: 6,
                available: 5
            }
        );
    }

    #[test]
    fn test_correct_choice_survives_shuffling() {
        let bank = bank(10);
        for seed in 0..100 {
            let session = SessionState::start(&bank, Mode::untimed(10), &mut rng(seed)).unwrap();
            for question in session.questions() {
                let original = bank
                    .iter()
                    .find(|record| record.text == question.text())
                    .unwrap();
                assert_eq!(
                    question.choice(question.correct_index()),
                    original.choices[original.answer]
                );
            }
        }
    }

    #[test]
    fn test_duplicate_choice_text_tracked_by_identity() {
        // Three identical choice texts; only slot 2 is the designated one.
        let question = Question {
            text: "dup".to_string(),
            choices: [
                "x".to_string(),
                "x".to_string(),
                "x".to_string(),
                "y".to_string(),
            ],
            answer: 2,
            explanation: String::new(),
        };

        for seed in 0..100 {
            let sq = SessionQuestion::new(question.clone(), &mut rng(seed));
            // The correct position maps back to the original slot, not to
            // whichever "x" happens to come first after the shuffle.
            assert_eq!(sq.slots[sq.correct], 2);
            assert_eq!(sq.choice(sq.correct_index()), "x");
        }
    }

    #[test]
    fn test_submit_correct_answer_scores() {
        let bank = bank(5);
        let mut session = SessionState::start(&bank, Mode::untimed(5), &mut rng(3)).unwrap();
        let correct = session.current().unwrap().correct_index();

        let outcome = session.submit_answer(correct).unwrap();
        assert!(outcome.is_correct);
        assert!(!outcome.timed_out);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.attempted_count(), 1);
        // Answering does not advance.
        assert_eq!(session.position(), 0);
        assert!(session.is_answered());
    }

    #[test]
    fn test_submit_wrong_answer_reports_correct_choice() {
        let bank = bank(5);
        let mut session = SessionState::start(&bank, Mode::untimed(5), &mut rng(4)).unwrap();
        let correct = session.current().unwrap().correct_index();
        let wrong = (correct + 1) % CHOICE_COUNT;
        let expected_text = session.current().unwrap().choice(correct).to_string();

        let outcome = session.submit_answer(wrong).unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.correct_choice, expected_text);
        assert!(!outcome.explanation.is_empty());
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.attempted_count(), 1);
    }

    #[test]
    fn test_double_answer_is_rejected() {
        let bank = bank(5);
        let mut session = SessionState::start(&bank, Mode::untimed(5), &mut rng(5)).unwrap();
        let correct = session.current().unwrap().correct_index();

        session.submit_answer(correct).unwrap();
        assert_eq!(session.submit_answer(correct), Err(SessionError::AlreadyAnswered));
        // Counters unchanged by the rejected second submit.
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.attempted_count(), 1);
    }

    #[test]
    fn test_out_of_range_choice_is_rejected() {
        let bank = bank(5);
        let mut session = SessionState::start(&bank, Mode::untimed(5), &mut rng(6)).unwrap();
        assert_eq!(
            session.submit_answer(CHOICE_COUNT),
            Err(SessionError::InvalidChoice { index: CHOICE_COUNT })
        );
        assert_eq!(session.attempted_count(), 0);
    }

    #[test]
    fn test_timer_expiry_counts_attempt_but_never_correct() {
        let bank = bank(5);
        let mut session = SessionState::start(&bank, Mode::timed(5, 15), &mut rng(7)).unwrap();

        let outcome = session.expire_timer().unwrap();
        assert!(!outcome.is_correct);
        assert!(outcome.timed_out);
        assert_eq!(session.attempted_count(), 1);
        assert_eq!(session.correct_count(), 0);

        // A second (late) expiry for the same question is a no-op.
        assert!(session.expire_timer().is_none());
        assert_eq!(session.attempted_count(), 1);
    }

    #[test]
    fn test_timer_expiry_after_answer_is_noop() {
        let bank = bank(5);
        let mut session = SessionState::start(&bank, Mode::timed(5, 15), &mut rng(8)).unwrap();
        let correct = session.current().unwrap().correct_index();
        session.submit_answer(correct).unwrap();

        assert!(session.expire_timer().is_none());
        assert_eq!(session.attempted_count(), 1);
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn test_advance_past_end_is_an_error() {
        let bank = bank(2);
        let mut session = SessionState::start(&bank, Mode::untimed(2), &mut rng(9)).unwrap();

        session.advance().unwrap();
        assert!(!session.is_complete());
        session.advance().unwrap();
        assert!(session.is_complete());
        assert!(session.current().is_none());
        assert_eq!(session.advance(), Err(SessionError::Complete));
        assert_eq!(session.submit_answer(0), Err(SessionError::Complete));
        assert!(session.expire_timer().is_none());
    }

    #[test]
    fn test_finish_three_of_five_is_fair() {
        let bank = bank(5);
        let mut session = SessionState::start(&bank, Mode::untimed(5), &mut rng(10)).unwrap();

        for i in 0..5 {
            let correct = session.current().unwrap().correct_index();
            if i < 3 {
                session.submit_answer(correct).unwrap();
            } else {
                session.submit_answer((correct + 1) % CHOICE_COUNT).unwrap();
            }
            session.advance().unwrap();
        }

        let summary = session.finish();
        assert_eq!(summary.correct, 3);
        assert_eq!(summary.attempted_for_scoring, 5);
        assert_eq!(summary.percentage, 60.0);
        assert_eq!(summary.tier, Tier::Fair);
    }

    #[test]
    fn test_all_timeouts_score_zero() {
        let bank = bank(4);
        let mut session = SessionState::start(&bank, Mode::timed(4, 15), &mut rng(11)).unwrap();

        while !session.is_complete() {
            assert!(session.expire_timer().is_some());
            session.advance().unwrap();
        }

        assert_eq!(session.attempted_count(), session.len());
        assert_eq!(session.correct_count(), 0);
        let summary = session.finish();
        assert_eq!(summary.percentage, 0.0);
        assert_eq!(summary.tier, Tier::NeedsReview);
    }

    #[test]
    fn test_skipped_questions_still_count_in_denominator() {
        let bank = bank(5);
        let mut session = SessionState::start(&bank, Mode::untimed(5), &mut rng(12)).unwrap();

        // Answer two correctly, skip the rest without attempting.
        for _ in 0..2 {
            let correct = session.current().unwrap().correct_index();
            session.submit_answer(correct).unwrap();
            session.advance().unwrap();
        }
        while !session.is_complete() {
            session.advance().unwrap();
        }

        let summary = session.finish();
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.attempted_for_scoring, 5);
        assert_eq!(summary.percentage, 40.0);
    }

    #[test]
    fn test_restart_produces_independent_sessions() {
        let bank = bank(22);
        let mode = Mode::untimed(5);
        let mut r = rng(13);

        let first = SessionState::start(&bank, mode, &mut r).unwrap();
        let second = SessionState::start(&bank, mode, &mut r).unwrap();

        for session in [&first, &second] {
            assert_eq!(session.len(), 5);
            assert_eq!(session.position(), 0);
            assert_eq!(session.correct_count(), 0);
            assert_eq!(session.attempted_count(), 0);
            let texts: HashSet<&str> = session.questions().iter().map(|q| q.text()).collect();
            assert_eq!(texts.len(), 5);
        }
    }
}
