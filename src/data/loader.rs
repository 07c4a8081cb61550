use std::fs;
use std::io;
use std::path::Path;

use crate::models::{Question, CHOICE_COUNT};

/// Error loading or validating a question bank.
#[derive(Debug)]
pub enum LoadError {
    /// Could not read the file.
    Io(io::Error),
    /// The file is not valid question JSON.
    Parse(serde_json::Error),
    /// The bank contains no questions.
    Empty,
    /// A record's `answer` does not index into its choices.
    AnswerOutOfRange { question: usize, answer: usize },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read question file: {}", e),
            LoadError::Parse(e) => write!(f, "failed to parse question file: {}", e),
            LoadError::Empty => write!(f, "question file contains no questions"),
            LoadError::AnswerOutOfRange { question, answer } => write!(
                f,
                "question {} has answer index {} (must be 0..{})",
                question + 1,
                answer,
                CHOICE_COUNT
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// Load and validate a question bank from a JSON file.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let json = fs::read_to_string(path).map_err(LoadError::Io)?;
    parse_questions(&json)
}

/// Parse and validate a question bank from a JSON string.
pub fn parse_questions(json: &str) -> Result<Vec<Question>, LoadError> {
    let questions: Vec<Question> = serde_json::from_str(json).map_err(LoadError::Parse)?;

    if questions.is_empty() {
        return Err(LoadError::Empty);
    }

    for (index, question) in questions.iter().enumerate() {
        if question.answer >= CHOICE_COUNT {
            return Err(LoadError::AnswerOutOfRange {
                question: index,
                answer: question.answer,
            });
        }
    }

    Ok(questions)
}

/// Data-quality lint: flag bank entries whose choices repeat the same text.
///
/// Scoring stays correct for such entries (correctness is tracked by choice
/// position, not by text), but duplicate choices are almost always a typo in
/// the bank, so they are worth surfacing.
pub fn duplicate_choice_warnings(questions: &[Question]) -> Vec<String> {
    let mut warnings = Vec::new();

    for (index, question) in questions.iter().enumerate() {
        for i in 0..question.choices.len() {
            for j in (i + 1)..question.choices.len() {
                if question.choices[i] == question.choices[j] {
                    warnings.push(format!(
                        "question {} repeats the choice \"{}\"",
                        index + 1,
                        question.choices[i]
                    ));
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_BANK: &str = r#"[
        {
            "text": "Quel est le synonyme le plus proche de « rapide » ?",
            "choices": ["lent", "vite", "immobile", "tardif"],
            "answer": 1,
            "explanation": "« vite » signifie rapidement."
        },
        {
            "text": "Quel est le participe passé de 'venir' ?",
            "choices": ["venu", "viennent", "venant", "vené"],
            "answer": 0
        }
    ]"#;

    #[test]
    fn test_parse_valid_bank() {
        let questions = parse_questions(VALID_BANK).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].answer, 1);
        assert_eq!(questions[0].choices[1], "vite");
        // explanation is optional and defaults to empty
        assert!(questions[1].explanation.is_empty());
    }

    #[test]
    fn test_parse_empty_bank() {
        assert!(matches!(parse_questions("[]"), Err(LoadError::Empty)));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_questions("not json"),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_answer_out_of_range() {
        let json = r#"[
            {"text": "q", "choices": ["a", "b", "c", "d"], "answer": 4}
        ]"#;
        assert!(matches!(
            parse_questions(json),
            Err(LoadError::AnswerOutOfRange {
                question: 0,
                answer: 4
            })
        ));
    }

    #[test]
    fn test_duplicate_choice_lint() {
        let json = r#"[
            {"text": "q1", "choices": ["a", "b", "c", "d"], "answer": 0},
            {"text": "q2", "choices": ["x", "x", "y", "z"], "answer": 2}
        ]"#;
        let questions = parse_questions(json).unwrap();
        let warnings = duplicate_choice_warnings(&questions);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("question 2"));
        assert!(warnings[0].contains("\"x\""));
    }
}
