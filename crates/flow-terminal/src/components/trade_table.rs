// crates/flow-terminal/src/components/trade_table.rs

use std::time::Instant;

use flow_core::render::{COLUMNS, DEFAULT_ROW_BG};
use flow_core::{CpTint, RenderedRow, RowStyle};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;

pub fn draw_trade_table(f: &mut Frame, area: Rect, app: &App) {
    let view = app.view();

    let header = Row::new(COLUMNS.to_vec())
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = view.rows.iter().map(table_row).collect();

    let widths = [
        Constraint::Length(9),  // Time
        Constraint::Length(7),  // Symbol
        Constraint::Length(9),  // Exp
        Constraint::Length(9),  // Strike
        Constraint::Length(5),  // C/P
        Constraint::Length(9),  // Spot
        Constraint::Min(16),    // Details
        Constraint::Length(8),  // Type
        Constraint::Length(9),  // Value
        Constraint::Length(7),  // IV
    ];

    let mut title = format!(" {} ", view.title);
    if !app.search_input.is_empty() {
        title.push_str(&format!("[search: {}] ", app.search_input));
    }
    if app.is_loading_more(Instant::now()) {
        title.push_str("loading more... ");
    } else if app.sync.store().end_of_data() && !view.is_empty() {
        title.push_str("(end) ");
    }

    let table = Table::new(rows, widths)
        .header(header)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ")
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    let mut state = TableState::default().with_selected(if view.is_empty() {
        None
    } else {
        Some(app.selected_row)
    });

    f.render_stateful_widget(table, area, &mut state);
}

fn table_row(row: &RenderedRow) -> Row<'static> {
    let style = row_style(row.style);

    let cp_style = match row.cp_tint {
        CpTint::Call => style.fg(Color::LightGreen),
        CpTint::Other => style.fg(Color::Red),
    };

    let type_style = match row.type_class.as_str() {
        "sweep" => style.fg(Color::Cyan).add_modifier(Modifier::BOLD),
        "block" => style.fg(Color::LightBlue).add_modifier(Modifier::BOLD),
        _ => style,
    };

    let cells: Vec<Cell> = row
        .cells
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let cell = Cell::from(text.clone());
            match i {
                4 => cell.style(cp_style),
                7 => cell.style(type_style),
                _ => cell,
            }
        })
        .collect();

    Row::new(cells).style(style)
}

pub fn row_style(style: RowStyle) -> Style {
    match style {
        RowStyle::Magenta => Style::default().fg(Color::Magenta),
        RowStyle::Yellow => Style::default().fg(Color::Yellow),
        RowStyle::Default => {
            let (r, g, b) = DEFAULT_ROW_BG;
            Style::default().fg(Color::White).bg(Color::Rgb(r, g, b))
        }
    }
}
