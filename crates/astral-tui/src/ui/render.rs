use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, LoginFocus, LoginMode, Tab};

use super::styles;
use super::tabs::{community, courses, dashboard, home, markets};

const BRAND: &str = "  ◆ Astral Pips Institute";

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Navigation bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_nav_bar(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::LoggingIn => render_login_overlay(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::Normal | AppState::Quitting => {}
    }
}

/// Brand on the left; sections and the session-dependent action on the right
fn render_nav_bar(frame: &mut Frame, app: &App, area: Rect) {
    let links = [
        ("[1] Home", Tab::Home),
        ("[2] Courses", Tab::Courses),
        ("[3] Forum", Tab::Forum),
        ("[4] Markets", Tab::Markets),
    ];

    let mut right = Vec::new();
    for (label, tab) in links {
        right.push(Span::styled(label, styles::tab_style(app.current_tab == tab)));
        right.push(Span::raw("  "));
    }
    let action = format!(" [s] {} ", app.nav_action_label());
    let action_style = if app.current_tab == Tab::Dashboard {
        styles::tab_style(true)
    } else {
        styles::button_style()
    };
    right.push(Span::styled(action, action_style));
    right.push(Span::raw(" "));

    let right_width: usize = right.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize)
        .saturating_sub(BRAND.chars().count())
        .saturating_sub(right_width);

    let mut spans = vec![
        Span::styled(BRAND, styles::title_style()),
        Span::raw(" ".repeat(padding)),
    ];
    spans.extend(right);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Home => home::render(frame, app, area),
        Tab::Courses => courses::render(frame, app, area),
        Tab::Forum => community::render(frame, app, area),
        Tab::Markets => markets::render(frame, app, area),
        Tab::Dashboard => dashboard::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = if app.signed_in {
        "[tab] next | [o] sign out | [?] help | [q]uit"
    } else {
        "[tab] next | [s]ign in | [u] sign up | [?] help | [q]uit"
    };

    let (left_text, left_style) = match app.status_message {
        Some(ref msg) => (format!(" {} ", msg), styles::success_style()),
        None => (format!(" {} ", app.current_tab.title()), styles::muted_style()),
    };
    let right_text = format!(" {} ", shortcuts);

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());

    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(48, 17, frame.area());
    frame.render_widget(Clear, area);

    let entries = [
        ("1-4", "Home / Courses / Forum / Markets"),
        ("Tab", "Next section"),
        ("Shift+Tab", "Previous section"),
        ("Enter", "Start your journey (Home)"),
        ("s", "Sign in, or open the dashboard"),
        ("u", "Create an account"),
        ("o", "Sign out"),
        ("Ctrl+T", "Switch sign in / sign up"),
        ("?", "Toggle this help"),
        ("q", "Quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (key, desc) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>10}  ", key), styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press Esc or ? to close",
        styles::muted_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(" Help ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    // Fixed size dialog - compact
    let height = if app.login_error.is_some() { 13 } else { 11 };
    let area = centered_rect_fixed(52, height, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];

    // Mode switcher
    let mode_span = |mode: LoginMode| {
        Span::styled(mode.title(), styles::tab_style(app.login_mode == mode))
    };
    lines.push(Line::from(vec![
        Span::raw("        "),
        mode_span(LoginMode::SignIn),
        Span::styled("  |  ", styles::muted_style()),
        mode_span(LoginMode::SignUp),
        Span::styled("   (Ctrl+T)", styles::muted_style()),
    ]));
    lines.push(Line::from(""));

    // Email field
    let email_focused = app.login_focus == LoginFocus::Email;
    let email_style = if email_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let email_tail: String = {
        // Show the end of long addresses so the cursor stays visible
        let count = app.login_email.chars().count();
        app.login_email.chars().skip(count.saturating_sub(24)).collect()
    };
    let cursor = if email_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("    "),
        Span::styled("Email:    [", styles::muted_style()),
        Span::styled(format!("{:<24}{}", email_tail, cursor), email_style),
        Span::styled("]", styles::muted_style()),
    ]));

    // Password field
    let password_focused = app.login_focus == LoginFocus::Password;
    let password_style = if password_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let password_masked: String = "*".repeat(app.login_password.chars().count().min(24));
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("    "),
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(format!("{:<24}{}", password_masked, cursor), password_style),
        Span::styled("]", styles::muted_style()),
    ]));

    // Submit button
    let button_focused = app.login_focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let label = app.login_mode.title();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("                ["),
        Span::styled(
            if button_focused {
                format!(" ▶ {} ◀ ", label)
            } else {
                format!("   {}   ", label)
            },
            button_style,
        ),
        Span::raw("]"),
    ]));

    // Error message, exactly as the provider reported it
    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(" Astral Pips ");

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(36, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("   Quit Astral Pips? ", styles::heading_style()),
            Span::styled("[y/n]", styles::highlight_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Helper to create a centered rect with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
