use std::path::PathBuf;
use std::process;

use clap::Parser;
use french_quiz::{Quiz, QuizConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long, default_value = "questions.json")]
    questions: PathBuf,

    /// Number of questions per session (defaults to the whole bank)
    #[arg(short, long)]
    count: Option<usize>,

    /// Enable the per-question countdown timer
    #[arg(short, long)]
    timer: bool,

    /// Seconds allowed per question when the timer is enabled
    #[arg(long, default_value_t = 15)]
    timer_seconds: u64,
}

fn main() {
    let args = Args::parse();
    let config = QuizConfig {
        question_count: args.count,
        timer_enabled: args.timer,
        timer_seconds: args.timer_seconds,
    };

    let quiz = match Quiz::from_json(&args.questions, config) {
        Ok(quiz) => quiz,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    for warning in quiz.bank_warnings() {
        eprintln!("warning: {}", warning);
    }

    if let Err(e) = quiz.run() {
        eprintln!("Error running quiz: {}", e);
        process::exit(1);
    }
}
