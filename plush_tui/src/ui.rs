//! UI rendering

mod battle_view;
mod help_view;
mod progress_view;
mod shop_view;

use crate::app::{App, Tab};
use plush_core::{Rarity, SaveStore};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn draw<S: SaveStore>(f: &mut Frame, app: &App<S>) {
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
        Tab::Battle => battle_view::draw(f, app, chunks[1]),
        Tab::Shop => shop_view::draw(f, app, chunks[1]),
        Tab::Progress => progress_view::draw(f, app, chunks[1]),
        Tab::Help => help_view::draw(f, chunks[1]),
    }

    draw_keybindings(f, app, chunks[2]);
}

fn draw_keybindings<S: SaveStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    // A toast replaces the key hints until it expires
    if let Some(toast) = app.toast_text() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            toast.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(" Notice "))
        .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let common_keys = [("Tab", "Next tab"), ("?", "Help"), ("q", "Quit")];

    let tab_keys: Vec<(&str, &str)> = match app.current_tab {
        Tab::Battle => vec![
            ("↑/↓", "Select tool"),
            ("Enter/Space", "Use"),
            ("d", "Daily"),
            ("m", "Mute"),
        ],
        Tab::Shop => vec![("↑/↓", "Select"), ("Enter/b", "Buy")],
        Tab::Progress => vec![("↑/↓", "Select quest"), ("Enter/c", "Claim"), ("s", "Autoplay")],
        Tab::Help => vec![],
    };

    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in tab_keys.iter().enumerate() {
        if i > 0 {
            spans.push(separator());
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::White)));
    }

    if !tab_keys.is_empty() {
        spans.push(separator());
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(separator());
        }
        spans.push(Span::styled(format!("[{}]", key), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn separator() -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(Color::DarkGray))
}

fn draw_tabs<S: SaveStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            // Flag the progress tab when something is waiting to be claimed
            let name = if *t == Tab::Progress && app.snapshot.quest_ready() {
                format!("{} •", t.name())
            } else {
                t.name().to_string()
            };
            Line::from(Span::styled(name, style))
        })
        .collect();

    let title = format!(
        " Plush Smash  {} coins{} ",
        app.snapshot.coins,
        if app.snapshot.muted { "  (muted)" } else { "" }
    );

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("|");

    f.render_widget(tabs, area);
}

pub fn progress_bar(current: f64, max: f64, width: u16, filled_color: Color) -> Paragraph<'static> {
    Paragraph::new(bar_text(current, max, width)).style(Style::default().fg(filled_color))
}

pub fn bar_text(current: f64, max: f64, width: u16) -> String {
    let percent = if max > 0.0 { (current / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (percent * width as f64) as usize;
    let empty = (width as usize).saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

pub fn rarity_to_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::White,
        Rarity::Rare => Color::Blue,
        Rarity::Epic => Color::Magenta,
        Rarity::Legend => Color::Rgb(175, 96, 37),
    }
}

/// Green above half, yellow above a quarter, red below
pub fn hp_color(percent: f64) -> Color {
    if percent > 50.0 {
        Color::Green
    } else if percent > 25.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}
