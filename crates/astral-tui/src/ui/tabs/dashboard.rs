use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use astral_core::models::{Identity, Profile};
use astral_core::utils::{format_date, truncate_string};

use crate::app::App;
use crate::ui::styles;

/// Width of the value column before long values are cut
const MAX_VALUE_WIDTH: usize = 48;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.store.snapshot();

    let Some(ref user) = state.user else {
        let paragraph = Paragraph::new(Span::styled(
            " Not signed in. Press [s] to sign in.",
            styles::muted_style(),
        ));
        frame.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_account(frame, user, state.profile.as_ref(), chunks[0]);
    render_profile(frame, state.profile.as_ref(), chunks[1]);
}

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:<14}", label), styles::muted_style()),
        Span::styled(truncate_string(&value, MAX_VALUE_WIDTH), styles::list_item_style()),
    ])
}

fn render_account(frame: &mut Frame, user: &Identity, profile: Option<&Profile>, area: Rect) {
    let name = profile
        .and_then(|p| p.display_name())
        .map(str::to_string)
        .unwrap_or_else(|| user.display_name());

    let confirmed = if user.is_confirmed() {
        Span::styled("confirmed", styles::success_style())
    } else {
        Span::styled("awaiting confirmation", styles::highlight_style())
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!(" Welcome back, {}", name), styles::title_style())),
        Line::from(""),
        field("Email", user.email.clone().unwrap_or_else(|| "-".to_string())),
        Line::from(vec![
            Span::styled(format!(" {:<14}", "Status"), styles::muted_style()),
            confirmed,
        ]),
        field("Member since", format_date(user.created_at, "-")),
        field("Last sign-in", format_date(user.last_sign_in_at, "never")),
        field("User ID", user.id.clone()),
        Line::from(""),
        Line::from(Span::styled(" [o] Sign out", styles::highlight_style())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(" Dashboard ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_profile(frame: &mut Frame, profile: Option<&Profile>, area: Rect) {
    let lines = match profile {
        Some(profile) => vec![
            Line::from(""),
            field("Username", profile.username.clone().unwrap_or_else(|| "-".to_string())),
            field("Full name", profile.full_name.clone().unwrap_or_else(|| "-".to_string())),
            field("Level", profile.experience_level.display_name().to_string()),
        ],
        None => vec![
            Line::from(""),
            Line::from(Span::styled(" No profile yet.", styles::muted_style())),
        ],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false))
        .title(" Profile ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
