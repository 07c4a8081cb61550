use serde::Deserialize;

/// Number of answer choices per question.
pub const CHOICE_COUNT: usize = 4;

/// One static quiz item: a prompt, four answer choices, the index of the
/// correct choice, and an optional explanation shown as feedback.
#[derive(Clone, Deserialize)]
pub struct Question {
    pub text: String,
    pub choices: [String; CHOICE_COUNT],
    pub answer: usize,
    #[serde(default)]
    pub explanation: String,
}
