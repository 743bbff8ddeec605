//! UI rendering

mod combat_view;
mod help_view;
mod registry_view;

use crate::app::{App, Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use toughness_core::{ToughnessBar, ToughnessColor};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.current_tab {
        Tab::Combat => combat_view::draw(f, app, chunks[1]),
        Tab::Registry => registry_view::draw(f, app, chunks[1]),
        Tab::Help => help_view::draw(f, app, chunks[1]),
    }

    draw_keybindings(f, app, chunks[2]);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![("Tab", "Next tab"), ("q", "Quit")];

    let tab_keys: Vec<(&str, &str)> = match app.current_tab {
        Tab::Combat => vec![
            ("a", "Attack"),
            ("w", "Weapon"),
            ("←/→", "Target"),
            ("v", "Void hit"),
            ("b", "Simulate"),
            ("r", "Reset"),
        ],
        Tab::Registry => vec![("↑/↓", "Scroll"), ("R", "Reload config")],
        Tab::Help => vec![],
    };

    let mut spans: Vec<Span> = Vec::new();

    // Add tab-specific keys first
    for (i, (key, desc)) in tab_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    if !tab_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::Gray),
        ));
    }

    let line = Line::from(spans);
    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(t.name(), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Toughness Bench "),
        )
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("|");

    f.render_widget(tabs, area);
}

/// Terminal color of a toughness band
pub fn band_color(color: ToughnessColor) -> Color {
    let (r, g, b) = color.rgb_channels();
    Color::Rgb(r, g, b)
}

/// Plain filled/empty bar
pub fn progress_bar(current: f32, max: f32, width: u16, filled_color: Color) -> Line<'static> {
    let percent = if max > 0.0 { (current / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (percent * width as f32) as usize;
    let empty = (width as usize).saturating_sub(filled);

    Line::from(vec![
        Span::styled("█".repeat(filled), Style::default().fg(filled_color)),
        Span::styled("░".repeat(empty), Style::default().fg(Color::DarkGray)),
    ])
}

/// Toughness bar split into its colored bands
///
/// The filled portion keeps each band's color; drained cells are dimmed.
/// A broken bar is drawn as a row of crosses.
pub fn toughness_bar(bar: &ToughnessBar, width: u16) -> Line<'static> {
    if bar.broken {
        return Line::from(Span::styled(
            "✕".repeat(width as usize),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let filled = (bar.percentage * width as f32).round() as u16;
    let mut spans = Vec::new();
    let mut cell: u16 = 0;
    for (color, cells) in bar.segment_widths(width) {
        let lit = filled.saturating_sub(cell).min(cells);
        if lit > 0 {
            spans.push(Span::styled(
                "█".repeat(lit as usize),
                Style::default().fg(band_color(color)),
            ));
        }
        if cells > lit {
            spans.push(Span::styled(
                "░".repeat((cells - lit) as usize),
                Style::default().fg(band_color(color)).add_modifier(Modifier::DIM),
            ));
        }
        cell += cells;
    }
    Line::from(spans)
}

pub fn stat_line(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:20}", name), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}
