use ratatui::style::{Color, Modifier, Style};

// Color palette
pub const PRIMARY: Color = Color::Rgb(37, 99, 235); // brand blue, also the EUR/USD line
pub const ACCENT: Color = Color::Rgb(245, 158, 11); // BTC/USD line
pub const SUCCESS: Color = Color::Rgb(22, 163, 74);
pub const ERROR: Color = Color::Rgb(220, 38, 38);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const HIGHLIGHT: Color = Color::Rgb(30, 41, 82);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn heading_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().bg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SUCCESS)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn tab_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    }
}

/// The call-to-action button in the nav bar
pub fn button_style() -> Style {
    Style::default()
        .bg(PRIMARY)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 32, 40)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn series_style(series: astral_core::models::Series) -> Style {
    match series {
        astral_core::models::Series::EurUsd => Style::default().fg(PRIMARY),
        astral_core::models::Series::BtcUsd => Style::default().fg(ACCENT),
    }
}

pub fn gauge_style() -> Style {
    Style::default().fg(PRIMARY).bg(Color::Rgb(48, 48, 64))
}
