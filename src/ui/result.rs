use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::session::{Summary, Tier};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(summary) = app.summary() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], summary);
    render_question_breakdown(frame, chunks[2], app, app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Excellent => Color::Green,
        Tier::Good => Color::Cyan,
        Tier::Fair => Color::Yellow,
        Tier::NeedsReview => Color::Red,
    }
}

/// Study-tip text per tier, from the original course material.
fn study_tip(tier: Tier) -> &'static str {
    match tier {
        Tier::Excellent => "Excellent travail ! Continuez à pratiquer la conversation et la lecture.",
        Tier::Good => "Bon travail ! Renforcez le vocabulaire et révisez les faux-amis.",
        Tier::Fair => {
            "Moyennement bien. Travaillez la grammaire (subjonctif, temps) et la compréhension écrite."
        }
        Tier::NeedsReview => {
            "Revue recommandée : révisez le vocabulaire de base, les conjugaisons, et pratiquez des passages de lecture chaque jour."
        }
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, summary: &Summary) {
    let tier = summary.tier;
    let color = tier_color(tier);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({:.1}%)  ·  {}",
                summary.correct,
                summary.attempted_for_scoring,
                summary.percentage,
                tier.label()
            ),
            Style::default().fg(color).bold(),
        )),
        Line::from(""),
        Line::from(study_tip(tier).fg(Color::Gray)),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App, scroll: usize) {
    let lines: Vec<Line> = app
        .session()
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let (symbol, color) = match question.attempt() {
                Some(attempt) if attempt.is_correct => ("+", Color::Green),
                Some(_) => ("-", Color::Red),
                None => ("·", Color::DarkGray),
            };

            let preview = truncate_question(question.text());

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(preview, Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
