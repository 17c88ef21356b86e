use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use astral_core::models::{course_catalog, Course, CourseStatus};

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let courses = course_catalog();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(8)])
        .split(area);

    let heading = Paragraph::new(Line::from(Span::styled(
        " Your Learning Path",
        styles::heading_style(),
    )));
    frame.render_widget(heading, chunks[0]);

    let constraints: Vec<Constraint> = courses
        .iter()
        .map(|_| Constraint::Ratio(1, courses.len() as u32))
        .collect();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(chunks[1]);

    for (course, card) in courses.iter().zip(cards.iter()) {
        render_card(frame, app, course, *card);
    }
}

fn render_card(frame: &mut Frame, app: &App, course: &Course, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(course.status() == CourseStatus::InProgress))
        .title(Span::styled(format!(" {} ", course.title), styles::title_style()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(2),    // Summary
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Action
        ])
        .split(inner);

    let summary = Paragraph::new(course.summary.as_str())
        .style(styles::list_item_style())
        .wrap(Wrap { trim: true });
    frame.render_widget(summary, rows[0]);

    let gauge = Gauge::default()
        .gauge_style(styles::gauge_style())
        .ratio(course.progress_ratio())
        .label(format!("{}%", course.progress_percent));
    frame.render_widget(gauge, rows[1]);

    // Progress is tracked per account, so locked courses stay locked until sign-in
    let (action, style) = match course.status() {
        CourseStatus::Locked if !app.signed_in => {
            ("Sign in to unlock".to_string(), styles::muted_style())
        }
        CourseStatus::Completed => ("Completed ✓".to_string(), styles::success_style()),
        _ => (format!("{} ›", course.action_label), styles::highlight_style()),
    };
    frame.render_widget(Paragraph::new(Span::styled(action, style)), rows[3]);
}
