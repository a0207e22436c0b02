// crates/flow-terminal/src/components/status_bar.rs

use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, InputMode, NoticeKind};

pub fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(36)])
        .split(area);

    let (msg, style) = match (&app.notice, app.input_mode) {
        (_, InputMode::Search) => {
            let input = vec![
                Span::raw("Search: "),
                Span::styled(&app.search_input, Style::default().fg(Color::Yellow)),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
                Span::raw(" [Enter] Keep [Esc] Clear"),
            ];
            (Line::from(input), Style::default().fg(Color::Yellow))
        }
        (Some(notice), _) => {
            let color = match notice.kind {
                NoticeKind::Info => Color::Green,
                NoticeKind::Error => Color::Red,
            };
            (
                Line::from(Span::styled(notice.text.as_str(), Style::default().fg(color))),
                Style::default().fg(color),
            )
        }
        (None, _) => {
            let shortcuts = vec![
                Span::styled("[/]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::raw("Search "),
                Span::styled("[F]", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw("ilters "),
                Span::styled("[Z]", Style::default().fg(Color::Magenta)),
                Span::raw(" Timezone "),
                Span::styled("[F1]", Style::default().fg(Color::Gray)),
                Span::raw("Help "),
                Span::styled("[Q]", Style::default().fg(Color::Gray)),
                Span::raw("uit"),
            ];
            (Line::from(shortcuts), Style::default())
        }
    };

    let paragraph = Paragraph::new(msg)
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, chunks[0]);

    let clock = Paragraph::new(app.clock_label(Utc::now()))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(clock, chunks[1]);
}
