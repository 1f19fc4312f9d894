use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::review::{AnswerStatus, Review, ReviewRow, ReviewState};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let review = match app.review() {
        ReviewState::Ready(review) => review,
        ReviewState::NotAvailable => {
            return render_message(frame, area, "No quiz results to show.");
        }
        ReviewState::Invalid => {
            return render_message(frame, area, "These quiz results are incomplete.");
        }
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(9),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], review);
    render_question_breakdown(frame, chunks[2], review, app.results_cursor(), app.expanded());
    render_controls(frame, chunks[3]);
}

fn get_grade_color(accuracy: u32) -> Color {
    match accuracy {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, review: &Review) {
    let result = &review.result;
    let accuracy = review.accuracy();
    let label = Style::default().fg(Color::DarkGray);

    let mut content = vec![
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / 10  ·  {}% accuracy", review.score(), accuracy),
            Style::default().fg(get_grade_color(accuracy)).bold(),
        )),
        Line::from(Span::styled(
            format!("completed in {}", review.time_in_words()),
            label,
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("total ", label),
            Span::raw(result.total_questions.to_string()),
            Span::styled("   attempted ", label),
            Span::raw(result.attempted_questions().to_string()),
            Span::styled("   correct ", label),
            Span::styled(result.correct_answers.to_string(), Color::Green),
            Span::styled("   incorrect ", label),
            Span::styled(result.incorrect_answers().to_string(), Color::Red),
            Span::styled("   skipped ", label),
            Span::styled(result.skipped_questions.to_string(), Color::Yellow),
        ]),
    ];

    if review.has_skipped() {
        content.push(Line::from(Span::styled(
            format!(
                "You skipped {} question(s). Try answering all of them next time.",
                result.skipped_questions
            ),
            Style::default().fg(Color::Yellow),
        )));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn row_lines<'a>(row: &'a ReviewRow, is_cursor: bool, expanded: bool) -> Vec<Line<'a>> {
    let marker = if is_cursor { ">" } else { " " };
    let number = Span::styled(
        format!("{:2}. ", row.number()),
        Style::default().fg(Color::DarkGray),
    );

    let (question, answer, status) = match row {
        ReviewRow::Item {
            question,
            answer,
            status,
            ..
        } => (question, answer, *status),
        ReviewRow::Missing { question_id, .. } => {
            return vec![Line::from(vec![
                Span::styled(format!("{} ! ", marker), Style::default().fg(Color::Red)),
                number,
                Span::styled(
                    format!("Question {} is missing from this result", question_id),
                    Style::default().fg(Color::Red).italic(),
                ),
            ])];
        }
    };

    let (symbol, color) = match status {
        AnswerStatus::Correct => ("+", Color::Green),
        AnswerStatus::Incorrect => ("-", Color::Red),
        AnswerStatus::Skipped => ("~", Color::Yellow),
    };
    let text_style = if is_cursor {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} {} ", marker, symbol), Style::default().fg(color)),
        number,
        Span::styled(truncate_question(&question.text), text_style),
        Span::styled(format!("  {}s", answer.time_taken), Style::default().fg(Color::DarkGray)),
    ])];

    if expanded {
        let dim = Style::default().fg(Color::DarkGray);
        lines.push(Line::from(vec![
            Span::styled("       your answer: ", dim),
            Span::styled(row.selected_text().unwrap_or("(none)"), Style::default().fg(color)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("       correct:     ", dim),
            Span::styled(row.correct_text().unwrap_or("-"), Style::default().fg(Color::Green)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("       ", dim),
            Span::styled(question.explanation.as_str(), Style::default().fg(Color::Gray)),
        ]));
    }

    lines
}

fn render_question_breakdown(
    frame: &mut Frame,
    area: Rect,
    review: &Review,
    cursor: usize,
    expanded: Option<usize>,
) {
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0;

    for (index, row) in review.rows.iter().enumerate() {
        if index == cursor {
            cursor_line = lines.len();
        }
        lines.extend(row_lines(row, index == cursor, expanded == Some(index)));
    }

    let visible = area.height.max(1) as usize;
    let scroll = cursor_line.saturating_sub(visible.saturating_sub(4));

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

fn render_message(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(message.fg(Color::Yellow)),
        Line::from(""),
        Line::from("n new quiz  ·  q quit".fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), chunks[1]);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k move  ·  enter details  ·  r retake  ·  n new quiz  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testing::{sample_question, sample_settings};
    use crate::models::{QuizAnswer, QuizResult};

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");
        let long = "x".repeat(60);
        assert_eq!(truncate_question(&long), format!("{}...", "x".repeat(55)));
    }

    #[test]
    fn test_missing_row_renders_placeholder() {
        let result = QuizResult::from_answers(
            sample_settings(30, 1),
            vec![sample_question("q1", 0)],
            vec![QuizAnswer::timed_out("gone", 30)],
            30,
        );
        let state = ReviewState::from_result(Some(result));
        let review = state.review().unwrap();

        let lines = row_lines(&review.rows[0], false, true);
        assert_eq!(lines.len(), 1);
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("Question gone is missing"));
    }

    #[test]
    fn test_expanded_row_shows_answer_details() {
        let result = QuizResult::from_answers(
            sample_settings(30, 1),
            vec![sample_question("q1", 2)],
            vec![QuizAnswer {
                question_id: "q1".to_string(),
                selected_option_id: Some("q1-0".to_string()),
                is_correct: false,
                is_skipped: false,
                time_taken: 7,
            }],
            7,
        );
        let state = ReviewState::from_result(Some(result));
        let review = state.review().unwrap();

        assert_eq!(row_lines(&review.rows[0], true, false).len(), 1);
        let lines = row_lines(&review.rows[0], true, true);
        assert_eq!(lines.len(), 4);
        let correct: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(correct.ends_with("Option 2"));
    }
}
