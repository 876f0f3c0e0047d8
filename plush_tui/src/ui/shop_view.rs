//! Shop tab view

use super::rarity_to_color;
use crate::app::App;
use plush_core::SaveStore;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw<S: SaveStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_catalog(f, app, chunks[0]);
    draw_details(f, app, chunks[1]);
}

fn draw_catalog<S: SaveStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let coins = app.snapshot.coins;

    let lines: Vec<Line> = app
        .shop_tools()
        .iter()
        .enumerate()
        .map(|(i, tool)| {
            let (prefix, style) = if i == app.selected_shop {
                (
                    "> ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                )
            } else {
                ("  ", Style::default().fg(rarity_to_color(tool.rarity)))
            };

            let price = tool.price.unwrap_or(0);
            let tag = if tool.owned {
                Span::styled("owned", Style::default().fg(Color::DarkGray))
            } else if price <= coins {
                Span::styled(format!("{} coins", price), Style::default().fg(Color::Green))
            } else {
                Span::styled(format!("{} coins", price), Style::default().fg(Color::Red))
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(format!("{:14}", tool.name), style),
                tag,
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Shop - {} coins ", coins)),
    );
    f.render_widget(paragraph, area);
}

fn draw_details<S: SaveStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let tools = app.shop_tools();
    let Some(tool) = tools.get(app.selected_shop) else {
        let empty = Paragraph::new("Nothing for sale")
            .block(Block::default().borders(Borders::ALL).title(" Details "));
        f.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            tool.name.clone(),
            Style::default()
                .fg(rarity_to_color(tool.rarity))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            tool.rarity.name().to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(tool.description.clone()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Cooldown: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.1}s", tool.cooldown_ms as f64 / 1000.0),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    if let Some(cost) = tool.cost {
        lines.push(Line::from(vec![
            Span::styled("Use cost: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{} coins", cost), Style::default().fg(Color::Yellow)),
        ]));
    }

    lines.push(Line::from(""));
    if tool.owned {
        lines.push(Line::from(Span::styled(
            "Already in your toolbox",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "[Enter] Buy",
            Style::default().fg(Color::Yellow),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(paragraph, area);
}
