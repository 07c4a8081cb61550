use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::session::{Outcome, SessionQuestion};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[2], question.text());
    render_options(frame, chunks[3], app, question);
    render_feedback(frame, chunks[4], app.feedback());
    render_controls(frame, chunks[5], app.current_answered());
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = format!(
        "Question {} of {}",
        app.current_question_number(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress).fg(Color::DarkGray);
    frame.render_widget(widget, area);

    if let Some(remaining) = app.remaining_seconds() {
        let color = if remaining <= 5 {
            Color::Red
        } else {
            Color::DarkGray
        };
        let timer = Paragraph::new(format!("Time left: {}s", remaining))
            .alignment(Alignment::Right)
            .fg(color);
        frame.render_widget(timer, area);
    }
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App, question: &SessionQuestion) {
    let answered = question.attempt();
    let mut lines: Vec<Line> = Vec::with_capacity(8);

    for (index, option) in question.choices().enumerate() {
        let (marker, style) = match answered {
            // After answering, show where the correct choice was and mark a
            // wrong pick; the cursor disappears.
            Some(attempt) => {
                if index == question.correct_index() {
                    ("=", Style::default().fg(Color::Green).bold())
                } else if attempt.choice == Some(index) {
                    ("x", Style::default().fg(Color::Red))
                } else {
                    (" ", Style::default().fg(Color::DarkGray))
                }
            }
            None => {
                if index == app.selected_option() {
                    (">", Style::default().fg(Color::Cyan).bold())
                } else {
                    (" ", Style::default().fg(Color::Gray))
                }
            }
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option, style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: Option<&Outcome>) {
    let Some(outcome) = feedback else {
        return;
    };

    let mut lines = Vec::with_capacity(2);
    if outcome.timed_out {
        lines.push(Line::from(Span::styled(
            "Temps écoulé — la question est passée.",
            Style::default().fg(Color::Yellow).italic(),
        )));
    } else if outcome.is_correct {
        lines.push(Line::from(Span::styled(
            "Correct !",
            Style::default().fg(Color::Green).bold(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("Incorrect — la bonne réponse : {}.", outcome.correct_choice),
            Style::default().fg(Color::Red),
        )));
    }
    if !outcome.explanation.is_empty() && !outcome.is_correct {
        lines.push(Line::from(Span::styled(
            outcome.explanation.clone(),
            Style::default().fg(Color::Gray).italic(),
        )));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, answered: bool) {
    let text = if answered {
        "enter next  ·  q quit"
    } else {
        "j/k navigate  ·  enter answer  ·  n skip  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
