mod loader;

pub use loader::{duplicate_choice_warnings, load_questions_from_json, parse_questions, LoadError};
