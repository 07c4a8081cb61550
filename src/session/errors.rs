use crate::models::CHOICE_COUNT;

/// Error from a session operation.
///
/// All of these are caller-contract violations or startup configuration
/// problems; nothing in a session can fail transiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The mode asked for more questions than the bank holds.
    InsufficientQuestions { requested: usize, available: usize },
    /// An answer index outside the choice range was submitted.
    InvalidChoice { index: usize },
    /// The current question was already answered in this visit.
    AlreadyAnswered,
    /// The session has no current question left.
    Complete,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InsufficientQuestions {
                requested,
                available,
            } => write!(
                f,
                "mode requires {} questions but the bank only has {}",
                requested, available
            ),
            SessionError::InvalidChoice { index } => {
                write!(f, "choice index {} is out of range 0..{}", index, CHOICE_COUNT)
            }
            SessionError::AlreadyAnswered => {
                write!(f, "the current question was already answered")
            }
            SessionError::Complete => write!(f, "the session is already complete"),
        }
    }
}

impl std::error::Error for SessionError {}
