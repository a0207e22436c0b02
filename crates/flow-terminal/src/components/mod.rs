// crates/flow-terminal/src/components/mod.rs

pub mod trade_table;
pub mod filter_panel;
pub mod status_bar;
pub mod help;
