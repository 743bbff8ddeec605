//! Registry view - live overrides, exemptions and tuning

use super::{band_color, stat_line};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(chunks[1]);

    draw_overrides(f, app, chunks[0]);
    draw_tuning(f, app, side_chunks[0]);
    draw_exemptions(f, app, side_chunks[1]);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn draw_overrides(f: &mut Frame, app: &App, area: Rect) {
    let overrides = app.resolver.overrides();
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{:28}{:>8}{:>11}  Colors", "Type", "Health", "Toughness"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let types = overrides.types();
    if types.is_empty() {
        lines.push(Line::from(Span::styled(
            "No overrides registered",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for type_id in &types {
        let health = overrides
            .max_health(type_id)
            .map(|v| format!("{:.0}", v))
            .unwrap_or_else(|| "-".to_string());
        let toughness = overrides
            .max_toughness(type_id)
            .map(|v| format!("{:.0}", v))
            .unwrap_or_else(|| "-".to_string());

        let mut spans = vec![
            Span::styled(format!("{:28}", type_id.to_string()), Style::default().fg(Color::White)),
            Span::styled(format!("{:>8}", health), Style::default().fg(Color::Green)),
            Span::styled(format!("{:>11}", toughness), Style::default().fg(Color::Cyan)),
            Span::raw("  "),
        ];
        match overrides.distribution(type_id) {
            Some(distribution) => {
                for (color, fraction) in distribution.iter() {
                    spans.push(Span::styled(
                        format!("{} {:.0}% ", color, fraction * 100.0),
                        Style::default().fg(band_color(color)),
                    ));
                }
            }
            None => spans.push(Span::styled("-", Style::default().fg(Color::DarkGray))),
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Overrides ({}) ", types.len())),
        )
        .scroll((app.registry_scroll as u16, 0));

    f.render_widget(paragraph, area);
}

fn draw_tuning(f: &mut Frame, app: &App, area: Rect) {
    let policy = app.resolver.store().policy();
    let constants = app.resolver.constants();

    let lines = vec![
        stat_line("Source", app.config_source.clone()),
        Line::from(""),
        section("Reduction"),
        stat_line("Min per hit", format!("{:.0}%", policy.min_pct() * 100.0)),
        stat_line("Max per hit", format!("{:.0}%", policy.max_pct() * 100.0)),
        section("Combat"),
        stat_line("Crit multiplier", format!("{:.2}x", constants.crit_multiplier)),
        stat_line("Strength / stack", format!("{:.1}", constants.strength_bonus_per_stack)),
        stat_line(
            "Chip range",
            format!("{:.2} - {:.2}", constants.chip_min, constants.chip_max),
        ),
        stat_line(
            "Absorbed to health",
            format!("{:.0}%", constants.absorbed_health_ratio * 100.0),
        ),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Tuning "));

    f.render_widget(paragraph, area);
}

fn draw_exemptions(f: &mut Frame, app: &App, area: Rect) {
    let bypass = app.resolver.bypass();
    let mut lines = Vec::new();

    let groups = [
        ("Damage types", bypass.damage_types()),
        ("Mod ids", bypass.mod_ids()),
        ("Item prefixes", bypass.item_prefixes()),
    ];
    for (title, entries) in groups {
        lines.push(section(title));
        if entries.is_empty() {
            lines.push(Line::from(Span::styled(
                "  (none)",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for entry in entries {
            lines.push(Line::from(Span::styled(
                format!("  {}", entry),
                Style::default().fg(Color::Magenta),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Exemptions "));

    f.render_widget(paragraph, area);
}
