//! Help tab view

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, area: Rect) {
    let lines = vec![
        section("Navigation"),
        key_line("1-4", "Jump to tab (Battle/Shop/Progress/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Move selection"),
        key_line("←/h  →/l", "Scroll the log"),
        key_line("q / Ctrl+C", "Save and quit"),
        key_line("?", "Toggle help"),
        Line::from(""),
        section("Battle"),
        key_line("Enter / Space", "Use the selected tool"),
        key_line("d", "Claim the daily bonus"),
        key_line("m", "Toggle sound"),
        key_line("R (twice)", "Erase all progress"),
        Line::from(""),
        section("Shop & Progress"),
        key_line("Enter / b", "Buy the selected tool"),
        key_line("Enter / c", "Claim a finished quest"),
        key_line("s", "Simulate a minute of autoplay"),
        Line::from(""),
        section("Game Mechanics"),
        Line::from(""),
        heading("Hits:"),
        Line::from("  Every hit rolls the tool's damage range, 5% chance to crit for ×2"),
        Line::from("  Coins per hit = half the damage (at least 1); combo grows with each hit"),
        Line::from(""),
        heading("Statuses:"),
        Line::from("  Burn, Shock and Slime deal damage over time"),
        Line::from("  Ghost halves damage, Shield blocks hits entirely"),
        Line::from("  Some tools hit harder against Frozen, Wet or Painted bosses"),
        Line::from(""),
        heading("Rounds:"),
        Line::from("  Each boss has more hp than the last and pays more coins"),
        Line::from("  Statuses and combo reset when a boss falls"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help & Mechanics "));

    f.render_widget(paragraph, area);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::default().fg(Color::Yellow)))
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
