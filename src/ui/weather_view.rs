//! Main screen rendering
//!
//! Renders the header with the theme toggle, the search field, and below it
//! exactly one of: the loading text, the error text, or the weather card.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::advice::Forecast;
use crate::app::{App, Status};
use crate::data::WeatherRecord;

use super::Palette;

/// Text shown while a lookup is in flight
pub const LOADING_TEXT: &str = "Loading weather data...";

/// Renders the main screen
pub fn render(frame: &mut Frame, app: &App, palette: &Palette) {
    let area = frame.area();

    let background = Block::default().style(
        Style::default()
            .bg(palette.background)
            .fg(palette.foreground),
    );
    frame.render_widget(background, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Search field
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_header(frame, chunks[0], app, palette);
    render_search(frame, chunks[1], app, palette);

    match app.status() {
        Status::Loading => render_message(frame, chunks[2], LOADING_TEXT, palette.accent),
        Status::Error => {
            let message = app.error_message.as_deref().unwrap_or_default();
            render_message(frame, chunks[2], message, palette.error);
        }
        Status::Success => {
            if let (Some(record), Some(forecast)) = (app.visible_weather(), app.forecast()) {
                render_card(frame, chunks[2], app, record, &forecast, palette);
            }
        }
        Status::Idle => render_message(
            frame,
            chunks[2],
            "Type a city and press Enter",
            palette.muted,
        ),
    }

    render_footer(frame, chunks[3], palette);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let title = Paragraph::new(Span::styled(
        " City Weather",
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, chunks[0]);

    let toggle = Paragraph::new(app.theme.toggle_glyph()).alignment(Alignment::Right);
    frame.render_widget(toggle, chunks[1]);
}

fn render_search(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let block = Block::default()
        .title(" Search a city ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));

    let line = Line::from(vec![
        Span::styled("\u{1F50D} ", Style::default().fg(palette.muted)), // 🔍
        Span::styled(app.search_text.clone(), Style::default().fg(palette.foreground)),
        Span::styled("_", Style::default().fg(palette.accent)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Renders a single centered line of status text
fn render_message(frame: &mut Frame, area: Rect, text: &str, color: ratatui::style::Color) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let paragraph = Paragraph::new(text.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, chunks[1]);
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    record: &WeatherRecord,
    forecast: &Forecast,
    palette: &Palette,
) {
    // Titled with the searched city so a new search never shows old visuals
    let block = Block::default()
        .title(format!(" {} ", app.active_city))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));

    let icon = forecast.icon.map(|icon| icon.glyph()).unwrap_or(" ");
    let advice_glyph = forecast
        .advice_glyph
        .map(|glyph| glyph.glyph())
        .unwrap_or(" ");

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                record.city.to_uppercase(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" \u{00B7} ", Style::default().fg(palette.muted)), // ·
            Span::styled(record.display_country(), Style::default().fg(palette.muted)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{}\u{00B0}C", record.display_temperature()),
                Style::default()
                    .fg(palette.temperature)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::raw(icon),
        ]),
    ];

    if let Some(description) = &forecast.description {
        lines.push(Line::from(Span::raw(description.clone())));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw(format!("{} ", advice_glyph)),
        Span::styled(
            forecast.advice.message(),
            Style::default().add_modifier(Modifier::ITALIC),
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Humidity {:.0}%   Wind {:.0}",
            record.humidity, record.wind_speed
        ),
        Style::default().fg(palette.muted),
    )));

    if let Some(updated) = app.last_updated {
        lines.push(Line::from(Span::styled(
            format!("Updated {}", updated.format("%H:%M")),
            Style::default().fg(palette.muted),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect, palette: &Palette) {
    let hints = Paragraph::new(" Enter: search   Ctrl+T: theme   F1: help   Esc: quit")
        .style(Style::default().fg(palette.muted));
    frame.render_widget(hints, area);
}
