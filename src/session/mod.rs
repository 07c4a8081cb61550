//! Quiz session core: question selection, choice shuffling, answer
//! evaluation, and score aggregation.
//!
//! The session never blocks and owns no timers. The display layer schedules
//! the per-question countdown and calls [`SessionState::expire_timer`] when
//! it fires; everything here is a plain synchronous state transition.

mod errors;
mod score;
mod state;

pub use errors::SessionError;
pub use score::{Summary, Tier};
pub use state::{Attempt, Mode, Outcome, SessionQuestion, SessionState};
