// crates/flow-terminal/src/components/help.rs

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

const SHORTCUTS: &[(&str, Color, &str)] = &[
    ("↑/k", Color::White, "Move Up"),
    ("↓/j", Color::White, "Move Down (loads more near the bottom)"),
    ("PgUp/PgDn", Color::White, "Jump Ten Rows"),
    ("g/G", Color::White, "First / Last Row"),
    ("/", Color::Yellow, "Search Loaded Trades"),
    ("f", Color::Cyan, "Open Filter Panel"),
    ("Space", Color::Cyan, "Toggle Filter (in panel)"),
    ("s / a", Color::Green, "Save / Apply Filters (in panel)"),
    ("r", Color::Yellow, "Reset Filters To Defaults (in panel)"),
    ("z", Color::Magenta, "Cycle Timezone"),
    ("F1", Color::Gray, "Toggle Help"),
    ("q", Color::Red, "Quit"),
];

pub fn draw_help(f: &mut Frame, area: Rect) {
    f.render_widget(Clear, area);

    let help_items: Vec<ListItem> = SHORTCUTS
        .iter()
        .map(|(key, color, text)| {
            ListItem::new(Line::from(vec![
                Span::styled(*key, Style::default().fg(*color).add_modifier(Modifier::BOLD)),
                Span::raw(format!(" - {}", text)),
            ]))
        })
        .collect();

    let help_list = List::new(help_items).block(
        Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(help_list, area);

    let footer = Paragraph::new("Press F1 or ESC to close help")
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
