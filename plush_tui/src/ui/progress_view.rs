//! Progress tab view - quests, achievements, daily bonus

use super::progress_bar;
use crate::app::App;
use plush_core::{QuestStatus, SaveStore};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw<S: SaveStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(7)])
        .split(chunks[1]);

    draw_quests(f, app, chunks[0]);
    draw_achievements(f, app, right[0]);
    draw_summary(f, app, right[1]);
}

fn draw_quests<S: SaveStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Quests ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width < 16 {
        return;
    }

    // Two rows per quest: text, then a progress bar
    for (i, quest) in app.snapshot.quests.iter().enumerate() {
        let y = inner.y + (i as u16) * 2;
        if y + 1 >= inner.y + inner.height {
            break;
        }

        let selected = i == app.selected_quest;
        let prefix = if selected { "> " } else { "  " };
        let tag_color = match quest.status {
            QuestStatus::InProgress => Color::Gray,
            QuestStatus::Ready => Color::Green,
            QuestStatus::Claimed => Color::DarkGray,
        };
        let text_style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::White)
        };

        let line = Line::from(vec![
            Span::styled(prefix, text_style),
            Span::styled(quest.text.clone(), text_style),
            Span::styled(format!("  +{}", quest.reward), Style::default().fg(Color::Yellow)),
            Span::styled(format!("  [{}]", quest.status.name()), Style::default().fg(tag_color)),
        ]);
        f.render_widget(Paragraph::new(line), Rect::new(inner.x, y, inner.width, 1));

        let bar_width = inner.width.saturating_sub(14);
        let bar_area = Rect::new(inner.x + 2, y + 1, bar_width, 1);
        f.render_widget(
            progress_bar(quest.progress as f64, quest.target as f64, bar_width, tag_color),
            bar_area,
        );
        let count_area = Rect::new(inner.x + 3 + bar_width, y + 1, 11, 1);
        f.render_widget(
            Paragraph::new(format!("{}/{}", quest.progress, quest.target))
                .style(Style::default().fg(Color::DarkGray)),
            count_area,
        );
    }
}

fn draw_achievements<S: SaveStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let snap = &app.snapshot;

    let lines: Vec<Line> = snap
        .achievements
        .iter()
        .map(|a| {
            if a.unlocked {
                Line::from(vec![
                    Span::styled("  ✓ ", Style::default().fg(Color::Green)),
                    Span::styled(a.title.clone(), Style::default().fg(Color::White)),
                    Span::styled(format!("  +{}", a.reward), Style::default().fg(Color::DarkGray)),
                ])
            } else {
                Line::from(vec![
                    Span::styled("  · ", Style::default().fg(Color::DarkGray)),
                    Span::styled(a.title.clone(), Style::default().fg(Color::DarkGray)),
                ])
            }
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default().borders(Borders::ALL).title(format!(
            " Achievements {}/{} ",
            snap.unlocked_count(),
            snap.achievements.len()
        )),
    );
    f.render_widget(paragraph, area);
}

fn draw_summary<S: SaveStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let snap = &app.snapshot;

    let daily = if snap.daily_available(app.today) {
        Span::styled("ready - press [d]", Style::default().fg(Color::Green))
    } else {
        Span::styled("claimed today", Style::default().fg(Color::DarkGray))
    };

    let autoplay = match &app.last_autoplay {
        Some(report) => Span::styled(report.summary(), Style::default().fg(Color::Cyan)),
        None => Span::styled("press [s] to simulate a minute", Style::default().fg(Color::DarkGray)),
    };

    let lines = vec![
        Line::from(vec![Span::styled("Daily bonus: ", Style::default().fg(Color::Gray)), daily]),
        Line::from(vec![
            Span::styled("Bosses beaten: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}", snap.boss_kills), Style::default().fg(Color::White)),
            Span::raw("  "),
            Span::styled("Variety streak: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}", snap.unique_streak), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Legendary used: ", Style::default().fg(Color::Gray)),
            Span::styled(
                if snap.legend_used { "yes" } else { "not yet" },
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![Span::styled("Autoplay: ", Style::default().fg(Color::Gray)), autoplay]),
    ];

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Summary "));
    f.render_widget(paragraph, area);
}
