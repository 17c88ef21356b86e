use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Hero
            Constraint::Length(5), // Did You Know?
        ])
        .split(area);

    render_hero(frame, app, chunks[0]);
    render_fact(frame, app, chunks[1]);
}

fn render_hero(frame: &mut Frame, app: &App, area: Rect) {
    let cta = if app.signed_in {
        "[Enter] Continue Your Journey ›"
    } else {
        "[Enter] Start Your Journey ›"
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Master the Markets with Confidence",
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Learn forex, crypto, and derivatives trading through our comprehensive, \
             gamified education platform.",
            styles::list_item_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(cta, styles::button_style())),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::NONE));
    frame.render_widget(paragraph, area);
}

fn render_fact(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(app.facts.current(), styles::highlight_style())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false))
        .title(Span::styled(" Did You Know? ", styles::heading_style()));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}
