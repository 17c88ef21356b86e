use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use astral_core::models::{community_links, CommunityLink};

use crate::app::App;
use crate::ui::styles;

const SUPPORT_EMAIL: &str = "support@astralpips.com";

/// Footer columns: heading and entries
const FOOTER: [(&str, &[&str]); 4] = [
    (
        "About Astral Pips",
        &["Your premier destination for comprehensive financial markets education."],
    ),
    ("Quick Links", &["Courses", "Forum", "Support"]),
    (
        "Resources",
        &["Market Analysis", "Economic Calendar", "Trading Tools"],
    ),
    ("Connect With Us", &["Twitter", "Discord", "YouTube", "Facebook"]),
];

pub fn render(frame: &mut Frame, _app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Heading
            Constraint::Min(6),    // Community cards
            Constraint::Length(10), // Footer
        ])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled("Join Our Trading Community", styles::heading_style())),
        Line::from(Span::styled(
            "Connect with fellow traders, share insights, and learn together.",
            styles::muted_style(),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(heading, chunks[0]);

    let links = community_links();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    for (link, card) in links.iter().zip(cards.iter()) {
        render_link(frame, link, *card);
    }

    render_footer(frame, chunks[2]);
}

fn render_link(frame: &mut Frame, link: &CommunityLink, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(link.summary.as_str(), styles::list_item_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} ›", link.action_label), styles::highlight_style()),
            Span::styled(format!("  {}", link.path), styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false))
        .title(Span::styled(format!(" {} ", link.title), styles::title_style()));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (i, ((heading, entries), column)) in FOOTER.iter().zip(columns.iter()).enumerate() {
        let mut lines = vec![Line::from(Span::styled(*heading, styles::heading_style()))];
        lines.extend(
            entries
                .iter()
                .map(|entry| Line::from(Span::styled(*entry, styles::muted_style()))),
        );
        if i == FOOTER.len() - 1 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Need help? Contact support:", styles::muted_style())));
            lines.push(Line::from(Span::styled(SUPPORT_EMAIL, styles::highlight_style())));
        }

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(styles::muted_style());
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            *column,
        );
    }
}
