// crates/flow-terminal/src/components/filter_panel.rs

use flow_core::catalog::FILTER_GROUPS;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub fn draw_filter_panel(f: &mut Frame, area: Rect, app: &App) {
    f.render_widget(Clear, area);

    let panel = &app.filter_panel;
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0usize;
    let mut index = 0usize;

    for group in FILTER_GROUPS {
        lines.push(Line::from(Span::styled(
            group.title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));

        for option in group.options {
            let mark = if panel.is_checked(option) { "[x]" } else { "[ ]" };
            let style = if index == panel.cursor {
                cursor_line = lines.len();
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{} {}", mark, option.label), style),
            ]));
            index += 1;
        }
        lines.push(Line::from(""));
    }

    // Keep the cursor line inside the panel.
    let inner_height = area.height.saturating_sub(3) as usize;
    let scroll = cursor_line.saturating_sub(inner_height.saturating_sub(1));

    let body_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let paragraph = Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .block(
            Block::default()
                .title(" Filters ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(paragraph, body_area);

    let footer = Paragraph::new("[Space]Toggle [S]ave [A]pply [R]eset [Esc]Cancel")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    let footer_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };
    f.render_widget(footer, footer_area);
}
