//! Help tab view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use toughness_core::defense::constants::DEFENSE_CAP;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let policy = app.resolver.store().policy();
    let constants = app.resolver.constants();

    let lines = vec![
        header("═══ Navigation ═══"),
        key_line("1-3", "Jump to tab (Combat/Registry/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Scroll log or registry"),
        key_line("q / Ctrl+C", "Quit"),
        key_line("?", "Toggle help"),
        Line::from(""),
        header("═══ Combat ═══"),
        key_line("a / Enter / Space", "Swing the selected weapon"),
        key_line("←/h  →/l", "Previous/next target"),
        key_line("w", "Cycle weapon"),
        key_line("f", "Toggle falling (critical hits)"),
        key_line("s", "Cycle strength stacks"),
        key_line("v", "Void damage (bypasses toughness)"),
        key_line("b", "Simulate hits until the target dies"),
        key_line("c", "Recolor the target's type"),
        key_line("r", "Reset target"),
        key_line("R", "Reload toughness.toml"),
        Line::from(""),
        header("═══ Mechanics ═══"),
        Line::from(""),
        topic("Toughness drain:"),
        Line::from(format!(
            "  Each breaking hit drains {:.0}%-{:.0}% of base damage,",
            policy.min_pct() * 100.0,
            policy.max_pct() * 100.0
        )),
        Line::from(format!(
            "  rising linearly with defense up to {:.0}",
            DEFENSE_CAP
        )),
        Line::from(""),
        topic("Base damage:"),
        Line::from(format!(
            "  Crits are divided by {:.1}, strength loses {:.0} per stack",
            constants.crit_multiplier, constants.strength_bonus_per_stack
        )),
        Line::from("  Capped at the weapon's listed attack damage"),
        Line::from(""),
        topic("Breaking a bar:"),
        Line::from("  The weapon must cover every color on the bar"),
        Line::from(format!(
            "  Absorbed hits still pass {:.0}% of base damage to health",
            constants.absorbed_health_ratio * 100.0
        )),
        Line::from("  The hit that breaks the bar deals its full damage"),
        Line::from("  A broken bar stays broken until re-initialized"),
        Line::from(""),
        topic("Chip damage:"),
        Line::from(format!(
            "  Weapons that cannot break deal {:.2}-{:.2} health",
            constants.chip_min, constants.chip_max
        )),
        Line::from(""),
        topic("Bypass:"),
        Line::from("  Void and environmental damage, registered damage types,"),
        Line::from("  mod ids, item prefixes and projectiles ignore toughness"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help & Mechanics "));

    f.render_widget(paragraph, area);
}

fn header(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn topic(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::Yellow)))
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:20}", key),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
