mod quiz;
mod result;
mod setup;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen {
        Screen::Setup => setup::render(frame, area, &app.setup),
        Screen::Loading => render_loading(frame, area),
        Screen::Quiz => quiz::render(frame, area, app),
        Screen::Results => result::render(frame, area, app),
        Screen::Empty => render_notice(
            frame,
            area,
            "NO QUESTIONS",
            "No questions are available for the selected topics.",
            Color::Yellow,
        ),
        Screen::Failed => render_notice(
            frame,
            area,
            "SOMETHING WENT WRONG",
            app.failure().unwrap_or("Questions could not be loaded."),
            Color::Red,
        ),
    }
}

fn centered_box(area: Rect, height: u16) -> Rect {
    Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .horizontal_margin(4)
    .split(area)[1]
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "PREPARING YOUR QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Generating questions...".fg(Color::DarkGray)),
        Line::from(""),
        Line::from("esc to cancel".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, centered_box(area, 8));
}

fn render_notice(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(title, Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(message.fg(Color::Gray)),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to return home".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, centered_box(area, 10));
}
