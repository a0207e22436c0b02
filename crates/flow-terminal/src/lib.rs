//! flow-terminal
//!
//! Terminal client for the option-flow feed: loads trades page by page,
//! polls for newer ones, and lets the user search, filter and page through
//! them. The binary in `main.rs` wires these modules to a real terminal.

pub mod app;
pub mod config;
pub mod settings;
pub mod network;
pub mod poller;
pub mod ui;
pub mod components;

pub use app::{App, InputMode};
pub use config::{ClientConfig, ConfigError};
pub use network::{FetchResponse, TradeFeedConnection};
pub use settings::{SettingsError, SettingsStore};
