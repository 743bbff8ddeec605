//! Combat view

use super::{band_color, progress_bar, stat_line, toughness_bar};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use toughness_core::{Combatant, ToughnessCapability};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(50),    // Target and log
            Constraint::Length(36), // Weapons panel
        ])
        .split(area);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Target status
            Constraint::Min(0),    // Combat log
        ])
        .split(chunks[0]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Weapons
            Constraint::Length(7), // Attacker state
        ])
        .split(chunks[1]);

    draw_target(f, app, main_chunks[0]);
    draw_combat_log(f, app, main_chunks[1]);
    draw_weapons(f, app, side_chunks[0]);
    draw_attacker(f, app, side_chunks[1]);
}

fn draw_target(f: &mut Frame, app: &App, area: Rect) {
    let target = app.target();
    let bar_width = area.width.saturating_sub(4);

    let health_pct = target.health_fraction();
    let health_color = if health_pct > 0.5 {
        Color::Green
    } else if health_pct > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", target.type_id),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}/{}]", app.selected_target + 1, app.targets.len()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!(
                    "  {:?}{}  defense {:.0}",
                    target.category,
                    if target.is_boss { " boss" } else { "" },
                    target.defense().unwrap_or(0.0)
                ),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(vec![
            Span::styled("Health: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.1}/{:.1}", target.health, target.max_health),
                Style::default().fg(health_color).add_modifier(Modifier::BOLD),
            ),
        ]),
        progress_bar(target.health, target.max_health, bar_width, health_color),
    ];

    match (app.target_bar(), app.resolver.store().get(target.id)) {
        (Some(bar), Some(state)) => {
            let status = if bar.broken {
                Span::styled(" BROKEN", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            } else {
                Span::styled(
                    format!(" ({:.0}%)", bar.percentage * 100.0),
                    Style::default().fg(Color::DarkGray),
                )
            };
            let bands: Vec<Span> = bar
                .segments
                .iter()
                .map(|(color, fraction)| {
                    Span::styled(
                        format!(" {} {:.0}%", color, fraction * 100.0),
                        Style::default().fg(band_color(*color)),
                    )
                })
                .collect();

            let mut header = vec![
                Span::styled("Toughness: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{:.1}/{:.1}", state.current(), state.max()),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                status,
            ];
            header.extend(bands);
            lines.push(Line::from(header));
            lines.push(toughness_bar(&bar, bar_width));
        }
        _ => {
            lines.push(Line::from(Span::styled(
                "No toughness",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Target "));

    f.render_widget(paragraph, area);
}

fn draw_combat_log(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .combat_log
        .iter()
        .skip(app.log_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|line| {
            let style = if line.starts_with("━━━") {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if line.contains("BROKEN") {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if line.contains("DEFEATED") {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else if line.contains("Absorbed") {
                Style::default().fg(Color::Blue)
            } else if line.contains("Bypassed") {
                Style::default().fg(Color::Magenta)
            } else if line.contains("Chipped") {
                Style::default().fg(Color::DarkGray)
            } else if line.contains('▶') {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(line.clone(), style)))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Combat Log "));

    f.render_widget(list, area);
}

fn draw_weapons(f: &mut Frame, app: &App, area: Rect) {
    let distribution = app.resolver.store().distribution(app.target().id);

    let items: Vec<ListItem> = app
        .weapons
        .iter()
        .enumerate()
        .map(|(i, preset)| {
            let selected = i == app.selected_weapon;
            let qualifies = distribution
                .map(|d| preset.weapon.qualifies_against(d))
                .unwrap_or(false);

            let marker = if selected { "▶ " } else { "  " };
            let name_style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(marker, name_style),
                Span::styled(format!("{:14}", preset.label), name_style),
                Span::styled(format!("{:>5.1} ", preset.damage()), Style::default().fg(Color::Gray)),
            ];
            for color in preset.weapon.toughness_colors() {
                spans.push(Span::styled("■", Style::default().fg(band_color(color))));
            }
            if qualifies {
                spans.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Weapons [w] "));

    f.render_widget(list, area);
}

fn draw_attacker(f: &mut Frame, app: &App, area: Rect) {
    let yes_no = |b: bool| if b { "yes" } else { "no" }.to_string();
    let lines = vec![
        stat_line("Falling (crit) [f]", yes_no(app.player.falling)),
        stat_line("Strength [s]", app.player.strength_stacks.to_string()),
        stat_line("Swing damage", format!("{:.1}", app.swing_damage())),
        stat_line("Breaks target", yes_no(app.weapon_qualifies())),
        match &app.last_outcome {
            Some(outcome) => Line::from(Span::styled(
                outcome.summary(),
                Style::default().fg(Color::DarkGray),
            )),
            None => Line::from(""),
        },
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Attacker "));

    f.render_widget(paragraph, area);
}
