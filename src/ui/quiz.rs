use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::QuizQuestion;
use crate::session::{Phase, QuizSession};
use crate::stats::format_time;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some((session, question)) = app
        .session()
        .and_then(|s| s.current_question().map(|q| (s, q)))
    else {
        let widget = Paragraph::new("No quiz in progress  ·  esc to return home")
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(widget, area);
        return;
    };
    let revealed = matches!(session.phase(), Phase::Revealed | Phase::TimedOut);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(if revealed { 6 } else { 0 }),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_notice(frame, chunks[0], app.notice());
    render_progress(frame, chunks[1], session, question);
    render_countdown(frame, chunks[2], session);
    render_question_text(frame, chunks[3], &question.text);
    render_options(frame, chunks[4], session, question, revealed);
    if revealed {
        render_explanation(frame, chunks[5], session, question);
    }
    render_controls(frame, chunks[6], revealed);
}

fn render_notice(frame: &mut Frame, area: Rect, notice: Option<&str>) {
    if let Some(notice) = notice {
        let widget = Paragraph::new(notice).fg(Color::Yellow);
        frame.render_widget(widget, area);
    }
}

fn render_progress(frame: &mut Frame, area: Rect, session: &QuizSession, question: &QuizQuestion) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Length(10)]).split(area);

    let mode = if session.is_practice() { "practice" } else { "live" };
    let topic = Paragraph::new(format!(
        "{} · {} · {}",
        mode,
        question.category.label(),
        question.difficulty
    ))
    .fg(Color::DarkGray);
    frame.render_widget(topic, chunks[0]);

    let progress = format!(
        "{}/{}",
        session.question_number(),
        session.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, chunks[1]);
}

/// Green from half the time up, yellow from a fifth up, red below.
fn countdown_color(remaining: u32, total: u32) -> Color {
    let ratio = if total > 0 {
        remaining as f64 / total as f64
    } else {
        0.0
    };

    if ratio >= 0.5 {
        Color::Green
    } else if ratio >= 0.2 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn render_countdown(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let total = session.settings().time_per_question;
    let remaining = session.remaining().min(total);
    let ratio = if total > 0 {
        remaining as f64 / total as f64
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(countdown_color(remaining, total)))
        .ratio(ratio)
        .label(format_time(remaining));
    frame.render_widget(gauge, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    session: &QuizSession,
    question: &QuizQuestion,
    revealed: bool,
) {
    let answered = session
        .current_answer()
        .and_then(|a| a.selected_option_id.as_deref());
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_cursor = !revealed && index == session.cursor();
        let is_selected = session.selected_option_id() == Some(option.id.as_str());

        let style = if revealed && option.is_correct {
            Style::default().fg(Color::Green).bold()
        } else if revealed && answered == Some(option.id.as_str()) {
            Style::default().fg(Color::Red).bold()
        } else if is_selected {
            Style::default().fg(Color::Magenta).bold()
        } else if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_cursor { ">" } else { " " };
        let label = OPTION_LABELS.get(index).copied().unwrap_or('?');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.text.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_explanation(frame: &mut Frame, area: Rect, session: &QuizSession, question: &QuizQuestion) {
    let heading = match session.phase() {
        Phase::TimedOut => Span::styled("Time's up!", Style::default().fg(Color::Red).bold()),
        _ => match session.current_answer() {
            Some(a) if a.is_correct => Span::styled("Correct", Style::default().fg(Color::Green).bold()),
            Some(a) if a.is_skipped => Span::styled("Skipped", Style::default().fg(Color::Yellow).bold()),
            _ => Span::styled("Incorrect", Style::default().fg(Color::Red).bold()),
        },
    };

    let content = vec![
        Line::from(heading),
        Line::from(question.explanation.as_str().fg(Color::Gray)),
    ];

    let widget = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, revealed: bool) {
    let text = if revealed {
        "enter next  ·  esc leave  ·  q quit"
    } else {
        "j/k navigate  ·  space select  ·  enter submit  ·  s skip  ·  esc leave  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_color_thresholds() {
        assert_eq!(countdown_color(60, 60), Color::Green);
        assert_eq!(countdown_color(30, 60), Color::Green);
        assert_eq!(countdown_color(29, 60), Color::Yellow);
        assert_eq!(countdown_color(12, 60), Color::Yellow);
        assert_eq!(countdown_color(11, 60), Color::Red);
        assert_eq!(countdown_color(0, 60), Color::Red);
    }
}
