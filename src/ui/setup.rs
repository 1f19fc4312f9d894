use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Tabs},
};

use crate::app::SetupForm;
use crate::models::Category;

pub fn render(frame: &mut Frame, area: Rect, form: &SetupForm) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0], form);
    render_tabs(frame, chunks[1], form);
    render_topics(frame, chunks[2], form);
    render_pickers(frame, chunks[3], form);
    render_error(frame, chunks[4], form);
    render_controls(frame, chunks[5]);
}

fn render_title(frame: &mut Frame, area: Rect, form: &SetupForm) {
    let content = vec![
        Line::from(Span::styled(
            "CAREER QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(
            format!("{} topics selected", form.selected().len()).fg(Color::DarkGray),
        ),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, form: &SetupForm) {
    let selected = Category::ALL
        .iter()
        .position(|c| *c == form.category())
        .unwrap_or(0);

    let tabs = Tabs::new(Category::ALL.iter().map(|c| c.label()))
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(tabs, area);
}

fn render_topics(frame: &mut Frame, area: Rect, form: &SetupForm) {
    let topics = form.topics();
    let visible = area.height.max(1) as usize;
    let offset = form.cursor().saturating_sub(visible.saturating_sub(1));

    let lines: Vec<Line> = topics
        .iter()
        .enumerate()
        .skip(offset)
        .map(|(index, topic)| {
            let is_cursor = index == form.cursor();
            let checked = form.is_selected(topic);
            let style = match (is_cursor, checked) {
                (true, _) => Style::default().fg(Color::Cyan).bold(),
                (false, true) => Style::default().fg(Color::Green),
                (false, false) => Style::default().fg(Color::Gray),
            };

            Line::from(vec![
                Span::styled(if is_cursor { " > " } else { "   " }, style),
                Span::styled(if checked { "[x] " } else { "[ ] " }, style),
                Span::styled(topic.name.as_str(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_pickers(frame: &mut Frame, area: Rect, form: &SetupForm) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::Yellow).bold();

    let line = Line::from(vec![
        Span::styled("time ", label),
        Span::styled(format!("{}s", form.time_per_question), value),
        Span::styled("   difficulty ", label),
        Span::styled(form.difficulty.to_string(), value),
        Span::styled("   questions ", label),
        Span::styled(form.number_of_questions.to_string(), value),
    ]);

    let widget = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::top(1)),
    );
    frame.render_widget(widget, area);
}

fn render_error(frame: &mut Frame, area: Rect, form: &SetupForm) {
    if let Some(error) = &form.error {
        let widget = Paragraph::new(error.as_str())
            .alignment(Alignment::Center)
            .fg(Color::Red);
        frame.render_widget(widget, area);
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "h/l category  ·  j/k move  ·  space toggle  ·  t/d/n time, difficulty, count  ·  enter start  ·  q quit",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
