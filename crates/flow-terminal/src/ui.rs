// crates/flow-terminal/src/ui.rs

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};
use crate::components::{
    filter_panel::draw_filter_panel,
    help::draw_help,
    status_bar::draw_status_bar,
    trade_table::draw_trade_table,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Trades
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    draw_header(f, chunks[0], app);
    draw_trade_table(f, chunks[1], app);
    draw_status_bar(f, chunks[2], app);

    if app.input_mode == InputMode::Filters {
        draw_filter_panel(f, centered_rect(50, 80, f.size()), app);
    }

    if app.show_help {
        draw_help(f, centered_rect(60, 60, f.size()));
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    // Left: live record count
    let left = Paragraph::new(Line::from(vec![Span::styled(
        app.view().title.as_str(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(left, header_chunks[0]);

    // Center: request status
    let store = app.sync.store();
    let (state, color) = match app.sync.in_flight() {
        Some((_, kind)) => (format!("{:?}...", kind), Color::Yellow),
        None if app.sync.reload_pending() => ("Reload queued".to_string(), Color::Yellow),
        None => ("Idle".to_string(), Color::Green),
    };
    let center_text = format!(
        "{} | Loaded: {} | Req: {}",
        state,
        store.len(),
        app.requests_sent
    );
    let center = Paragraph::new(center_text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(center, header_chunks[1]);

    // Right: help hints
    let right = Paragraph::new("[F1]Help [F]ilters [/]Search")
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(right, header_chunks[2]);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
