//! Battle tab view - boss, tools and event log

use super::{bar_text, hp_color, rarity_to_color};
use crate::app::App;
use plush_core::SaveStore;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw<S: SaveStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(50), Constraint::Length(42)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Boss panel
            Constraint::Min(0),    // Tools
        ])
        .split(chunks[0]);

    draw_boss(f, app, left[0]);
    draw_tools(f, app, left[1]);
    draw_log(f, app, chunks[1]);
}

fn draw_boss<S: SaveStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let snap = &app.snapshot;
    let color = hp_color(snap.hp_percent);
    let bar_width = area.width.saturating_sub(4);

    let statuses: Vec<Span> = if snap.statuses.is_empty() {
        vec![Span::styled("none", Style::default().fg(Color::DarkGray))]
    } else {
        snap.statuses
            .iter()
            .map(|s| {
                Span::styled(
                    format!("{} {}  ", s.kind.name(), s.ticks),
                    Style::default().fg(Color::Magenta),
                )
            })
            .collect()
    };

    let mut status_line = vec![Span::styled("Status: ", Style::default().fg(Color::Gray))];
    status_line.extend(statuses);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Boss #{}  ", snap.boss_kills + 1),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                format!("{}/{}", snap.hp, snap.max_hp),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({:.0}%)", snap.hp_percent),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            bar_text(snap.hp as f64, snap.max_hp as f64, bar_width),
            Style::default().fg(color),
        )),
        Line::from(vec![
            Span::styled("Combo: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}", snap.combo), Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(" (best {})", snap.combo_best),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  "),
            Span::styled("Hits: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}", snap.hits), Style::default().fg(Color::White)),
            Span::raw("  "),
            Span::styled("Coins: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}", snap.coins), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(status_line),
    ];

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Boss "));
    f.render_widget(paragraph, area);
}

fn draw_tools<S: SaveStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let tools = app.battle_tools();

    let lines: Vec<Line> = tools
        .iter()
        .enumerate()
        .map(|(i, tool)| {
            let (prefix, style) = if i == app.selected_tool {
                (
                    "> ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                )
            } else {
                ("  ", Style::default().fg(rarity_to_color(tool.rarity)))
            };

            let state = if tool.is_ready() {
                Span::styled("ready", Style::default().fg(Color::Green))
            } else {
                Span::styled(
                    bar_text(1.0 - tool.cooldown_fraction(), 1.0, 8),
                    Style::default().fg(Color::DarkGray),
                )
            };

            let cost = match tool.cost {
                Some(cost) => format!(" ({}c)", cost),
                None => String::new(),
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(format!("{:14}", tool.name), style),
                state,
                Span::styled(cost, Style::default().fg(Color::Yellow)),
            ])
        })
        .collect();

    // Reserve the last rows for the description of the selection
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Tools ({}) ", tools.len())),
    );
    f.render_widget(list, chunks[0]);

    let description = tools
        .get(app.selected_tool)
        .map(|t| t.description.clone())
        .unwrap_or_default();
    let info = Paragraph::new(Span::styled(description, Style::default().fg(Color::Gray)))
        .block(Block::default().borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM));
    f.render_widget(info, chunks[1]);
}

fn draw_log<S: SaveStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let items: Vec<ListItem> = app
        .log
        .iter()
        .skip(app.log_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|line| {
            let style = if line.contains("CRIT!") {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if line.contains("Boss defeated") {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else if line.contains("Achievement") || line.contains("Legendary") {
                Style::default().fg(Color::Magenta)
            } else if line.contains("+") && line.contains("hp") && !line.contains("-") {
                Style::default().fg(Color::Green)
            } else if line.contains("autoplay") {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(line.clone(), style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Log (←/→ to scroll) "),
    );
    f.render_widget(list, area);

    // Daily bonus hint on the bottom border
    if app.snapshot.daily_available(app.today) && area.height > 3 {
        let hint = Rect {
            x: area.x + 2,
            y: area.y + area.height - 1,
            width: area.width.saturating_sub(4).min(24),
            height: 1,
        };
        f.render_widget(
            Paragraph::new(Span::styled(
                " [d] daily bonus ready ",
                Style::default().fg(Color::Green),
            )),
            hint,
        );
    }
}
