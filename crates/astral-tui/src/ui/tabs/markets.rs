use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use astral_core::models::{market_data, series_bounds, MarketPoint, Series};
use astral_core::utils::format_price;

use crate::app::App;
use crate::ui::styles;

/// Fraction of the observed range added above and below each line
const AXIS_PADDING: f64 = 0.15;

pub fn render(frame: &mut Frame, _app: &App, area: Rect) {
    let points = market_data();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Heading + latest quotes
            Constraint::Min(8),    // Charts
        ])
        .split(area);

    render_quotes(frame, &points, chunks[0]);

    // One chart per instrument so each keeps its own scale
    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_series(frame, &points, Series::EurUsd, charts[0]);
    render_series(frame, &points, Series::BtcUsd, charts[1]);
}

fn render_quotes(frame: &mut Frame, points: &[MarketPoint], area: Rect) {
    let mut spans = vec![Span::styled(" Live Market Overview   ", styles::heading_style())];
    if let Some(last) = points.last() {
        for series in [Series::EurUsd, Series::BtcUsd] {
            spans.push(Span::styled(
                format!("{} {}   ", series.label(), format_price(series, series.value(last))),
                styles::series_style(series),
            ));
        }
        spans.push(Span::styled(
            format!("(as of {})", last.time),
            styles::muted_style(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_series(frame: &mut Frame, points: &[MarketPoint], series: Series, area: Rect) {
    let data: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, series.value(p)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false))
        .title(Span::styled(format!(" {} ", series.label()), styles::series_style(series)));

    let Some([lo, hi]) = series_bounds(points, series, AXIS_PADDING) else {
        frame.render_widget(Paragraph::new(" No data").block(block), area);
        return;
    };

    let dataset = Dataset::default()
        .name(series.label())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(styles::series_style(series))
        .data(&data);

    let x_labels: Vec<Span> = [points.first(), points.last()]
        .into_iter()
        .flatten()
        .map(|p| Span::styled(p.time.clone(), styles::muted_style()))
        .collect();
    let y_labels: Vec<Span> = [lo, (lo + hi) / 2.0, hi]
        .into_iter()
        .map(|v| Span::styled(format_price(series, v), styles::muted_style()))
        .collect();

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(styles::muted_style())
                .bounds([0.0, data.len().saturating_sub(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(styles::muted_style())
                .bounds([lo, hi])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}
